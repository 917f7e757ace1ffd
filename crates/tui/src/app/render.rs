use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TOGGLE_WIDTH: u16 = 4;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        self.layout.calculate_layout(area);

        let panels = self.layout.get_panels().to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Topbar => self.render_topbar(frame, panel.rect),
                PanelType::KeyField => self.render_key_field(frame, panel.rect),
                PanelType::Buttons => self.render_buttons(frame, panel.rect),
                PanelType::History => self.render_history(frame, panel.rect),
                PanelType::Banner => self.render_banner(frame, panel.rect),
                PanelType::Footer => self.render_footer(frame, panel.rect),
            }
        }

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_topbar(&self, frame: &mut Frame, area: Rect) {
        let status = match self.loading_command {
            Some(command) => format!("sending \"{}\"", command.code()),
            None => "idle".to_string(),
        };
        let text = format!(" ● fan-ctl   {}   [{}]", self.config.endpoint.url, status);
        frame.render_widget(
            Paragraph::new(text).style(Style::default().add_modifier(Modifier::BOLD)),
            area,
        );
    }

    fn render_key_field(&self, frame: &mut Frame, area: Rect) {
        let is_focused = self.focus == Focus::KeyField && !self.show_help;
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" API key ")
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width <= TOGGLE_WIDTH || inner.height == 0 {
            return;
        }

        let text_area = Rect {
            width: inner.width - TOGGLE_WIDTH,
            height: 1,
            ..inner
        };
        let toggle_area = Rect {
            x: inner.x + inner.width - TOGGLE_WIDTH,
            width: TOGGLE_WIDTH,
            height: 1,
            ..inner
        };

        let display = self.key_field.display_text();
        let field = if display.is_empty() && !is_focused {
            Paragraph::new("[not set]").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(display.clone())
        };
        frame.render_widget(field, text_area);
        frame.render_widget(
            Paragraph::new(format!(" {} ", self.key_field.icon())),
            toggle_area,
        );

        if is_focused {
            let offset = u16::try_from(display.chars().count())
                .unwrap_or(u16::MAX)
                .min(text_area.width.saturating_sub(1));
            frame.set_cursor_position((text_area.x + offset, text_area.y));
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let is_focused = self.focus == Focus::Buttons && !self.show_help;

        let items: Vec<ListItem> = self
            .command_buttons()
            .iter()
            .enumerate()
            .map(|(i, button)| {
                let prefix = if button.selected { "> " } else { "  " };
                let style = if !button.enabled {
                    Style::default().fg(Color::DarkGray)
                } else if button.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{}{} {}", prefix, i + 1, button.label())).style(style)
            })
            .collect();

        let title = if self.is_loading {
            " Commands (busy) "
        } else {
            " Commands "
        };
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            ),
            area,
        );
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|entry| {
                let (mark, color) = if entry.outcome.is_error {
                    ("✗", Color::Red)
                } else {
                    ("✓", Color::Green)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.outcome.completed_at.format("%H:%M:%S").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(" {:<7} ", entry.command.code())),
                    Span::styled(format!("{mark} {}", entry.outcome.message), Style::default().fg(color)),
                ]))
            })
            .collect();

        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Activity ")),
            area,
        );
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let (content, color) = if self.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()];
            (format!(" {spinner} "), Color::Cyan)
        } else {
            match self.last_response {
                Some(ref response) if response.is_error => (response.message.clone(), Color::Red),
                Some(ref response) => (response.message.clone(), Color::Green),
                None => (String::new(), Color::Reset),
            }
        };

        frame.render_widget(
            Paragraph::new(content)
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Status ")
                        .border_style(Style::default().fg(color)),
                ),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = match self.last_error {
            Some(ref error) => {
                Paragraph::new(format!(" {error} ")).style(Style::default().fg(Color::Red))
            }
            None => Paragraph::new(self.keybinds.footer_hint())
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(footer, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help_text = self.keybinds.help_text();
        let popup_area = self.centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press ? to close "),
            ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
