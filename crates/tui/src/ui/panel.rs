use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelType {
    Topbar,
    KeyField,
    Buttons,
    History,
    Banner,
    Footer,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub panel_type: PanelType,
    pub rect: Rect,
}

impl Panel {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect.contains(Position::new(column, row))
    }
}
