use super::*;

impl App {
    /// Replaces the key and writes it through to storage.
    pub fn set_api_key(&mut self, value: impl Into<String>) {
        if self.key_field.set_value(value.into()) {
            self.persist_api_key();
        }
    }

    pub(super) fn edit_api_key(&mut self, edit: impl FnOnce(&mut KeyField) -> bool) {
        if edit(&mut self.key_field) {
            self.persist_api_key();
        }
    }

    fn persist_api_key(&mut self) {
        let value = self.key_field.value().to_string();
        match self.key_store.set(API_KEY_STORAGE_KEY, &value) {
            Ok(()) => self.clear_error(),
            Err(e) => self.report_error("Failed to save API key", e),
        }
    }

    pub fn toggle_api_key_visibility(&mut self) {
        self.key_field.toggle_visibility();
    }

    pub fn command_buttons(&self) -> Vec<CommandButton> {
        Command::ALL
            .into_iter()
            .map(|command| CommandButton {
                command,
                enabled: !self.is_loading,
                selected: self.focus == Focus::Buttons && command.index() == self.selected_button,
            })
            .collect()
    }

    pub fn dispatch_selected(&mut self) -> bool {
        match Command::from_index(self.selected_button) {
            Some(command) => self.dispatch_command(command),
            None => false,
        }
    }

    pub(super) fn select_next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % Command::ALL.len();
    }

    pub(super) fn select_previous_button(&mut self) {
        self.selected_button = self
            .selected_button
            .checked_sub(1)
            .unwrap_or(Command::ALL.len() - 1);
    }

    pub(super) fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::KeyField => Focus::Buttons,
            Focus::Buttons => Focus::KeyField,
        };
    }
}
