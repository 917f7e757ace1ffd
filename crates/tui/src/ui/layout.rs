use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::panel::{Panel, PanelType};

const TOPBAR_HEIGHT: u16 = 1;
const KEY_FIELD_HEIGHT: u16 = 3;
const BANNER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const BUTTONS_WIDTH: u16 = 24;
const MIN_BODY_HEIGHT: u16 = 7;
/// Columns at the right edge of the key field occupied by the lock icon.
const TOGGLE_WIDTH: u16 = 4;

#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOPBAR_HEIGHT),
                Constraint::Length(KEY_FIELD_HEIGHT),
                Constraint::Min(MIN_BODY_HEIGHT),
                Constraint::Length(BANNER_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let body_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(BUTTONS_WIDTH), Constraint::Min(20)])
            .split(main_layout[2]);

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Topbar,
                rect: main_layout[0],
            },
            Panel {
                panel_type: PanelType::KeyField,
                rect: main_layout[1],
            },
            Panel {
                panel_type: PanelType::Buttons,
                rect: body_layout[0],
            },
            Panel {
                panel_type: PanelType::History,
                rect: body_layout[1],
            },
            Panel {
                panel_type: PanelType::Banner,
                rect: main_layout[3],
            },
            Panel {
                panel_type: PanelType::Footer,
                rect: main_layout[4],
            },
        ];

        &self.cached_panels
    }

    pub fn get_panels(&self) -> &[Panel] {
        &self.cached_panels
    }

    pub fn get_rect(&self, panel_type: PanelType) -> Option<Rect> {
        self.cached_panels
            .iter()
            .find(|p| p.panel_type == panel_type)
            .map(|p| p.rect)
    }

    pub fn panel_at(&self, column: u16, row: u16) -> Option<PanelType> {
        self.cached_panels
            .iter()
            .find(|p| p.contains(column, row))
            .map(|p| p.panel_type)
    }

    /// Index of the command button drawn at the given cell, one button per
    /// row inside the bordered buttons panel.
    pub fn button_at(&self, column: u16, row: u16, button_count: usize) -> Option<usize> {
        let rect = self.get_rect(PanelType::Buttons)?;
        let inner_left = rect.x + 1;
        let inner_right = rect.x + rect.width.saturating_sub(1);
        let first_row = rect.y + 1;
        if column < inner_left || column >= inner_right || row < first_row {
            return None;
        }
        let index = usize::from(row - first_row);
        (index < button_count && row < rect.y + rect.height.saturating_sub(1)).then_some(index)
    }

    pub fn is_visibility_toggle(&self, column: u16, row: u16) -> bool {
        let Some(rect) = self.get_rect(PanelType::KeyField) else {
            return false;
        };
        let right = rect.x + rect.width.saturating_sub(1);
        row == rect.y + 1 && column < right && column >= right.saturating_sub(TOGGLE_WIDTH)
    }
}
