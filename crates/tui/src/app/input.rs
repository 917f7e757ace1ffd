use super::*;

impl App {
    /// Returns `true` when the app should quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key_event(key),
            Event::Mouse(mouse) => {
                self.handle_mouse_event(mouse);
                false
            }
            Event::Paste(text) => {
                if self.focus == Focus::KeyField && !self.show_help {
                    self.edit_api_key(|field| field.paste(&text));
                }
                false
            }
            _ => false,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // AltGr arrives as CONTROL | ALT on Windows.
        let command_chord = ctrl && !key.modifiers.contains(KeyModifiers::ALT);

        if command_chord && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return true;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return false;
        }

        if command_chord && key.code == KeyCode::Char('r') {
            self.toggle_api_key_visibility();
            return false;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.cycle_focus();
                return false;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::KeyField => self.handle_key_field_key(key, command_chord),
            Focus::Buttons => self.handle_buttons_key(key),
        }
        false
    }

    fn handle_key_field_key(&mut self, key: KeyEvent, command_chord: bool) {
        match key.code {
            KeyCode::Char('u') if command_chord => self.edit_api_key(KeyField::clear),
            KeyCode::Char(_) if command_chord => {}
            KeyCode::Char(c) => self.edit_api_key(|field| field.handle_char(c)),
            KeyCode::Backspace => self.edit_api_key(KeyField::handle_backspace),
            KeyCode::Enter | KeyCode::Down => self.focus = Focus::Buttons,
            _ => {}
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_button(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_button(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dispatch_selected();
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(c @ '1'..='5') => {
                let index = usize::from(c as u8 - b'1');
                if let Some(command) = Command::from_index(index) {
                    self.dispatch_command(command);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let (column, row) = (mouse.column, mouse.row);
        if self.layout.is_visibility_toggle(column, row) {
            self.toggle_api_key_visibility();
            return;
        }

        if let Some(index) = self.layout.button_at(column, row, Command::ALL.len()) {
            self.focus = Focus::Buttons;
            self.selected_button = index;
            self.dispatch_selected();
            return;
        }

        match self.layout.panel_at(column, row) {
            Some(PanelType::KeyField) => self.focus = Focus::KeyField,
            Some(PanelType::Buttons) => self.focus = Focus::Buttons,
            _ => {}
        }
    }
}
