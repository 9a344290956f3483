//! Layout calculations for the archive browser.
//!
//! `AppLayout::calculate` is a pure function of the terminal area and the
//! visible chrome, so the event layer can recompute the same rects for
//! mouse hit-testing that the renderer painted.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen areas.
pub struct AppLayout {
    pub title_bar: Rect,
    /// Spoiler notice line, present on the wizards and timeline pages
    /// until dismissed.
    pub notice_bar: Option<Rect>,
    /// Search input, present on the browse pages.
    pub search_bar: Option<Rect>,
    /// Active-filter summary line, present on the browse pages.
    pub filter_bar: Option<Rect>,
    pub content: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect, has_notice: bool, has_search: bool) -> Self {
        let notice_height = if has_notice { 1 } else { 0 };
        let search_height = if has_search { 3 } else { 0 };
        let filter_height = if has_search { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),             // Title bar
                Constraint::Length(notice_height), // Spoiler notice
                Constraint::Length(search_height), // Search input
                Constraint::Length(filter_height), // Filter summary
                Constraint::Min(6),                // Content
                Constraint::Length(1),             // Status bar
                Constraint::Length(1),             // Hotkey bar
            ])
            .split(area);

        Self {
            title_bar: chunks[0],
            notice_bar: (has_notice).then_some(chunks[1]),
            search_bar: (has_search).then_some(chunks[2]),
            filter_bar: (has_search).then_some(chunks[3]),
            content: chunks[4],
            status_bar: chunks[5],
            hotkey_bar: chunks[6],
        }
    }
}

/// Fixed-size centered popup, clipped to the available area.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_rows_collapse_when_hidden() {
        let area = Rect::new(0, 0, 80, 24);
        let with = AppLayout::calculate(area, true, true);
        assert!(with.notice_bar.is_some());
        assert!(with.search_bar.is_some());

        let without = AppLayout::calculate(area, false, false);
        assert!(without.notice_bar.is_none());
        assert!(without.search_bar.is_none());
        assert!(without.content.height > with.content.height);
    }

    #[test]
    fn popup_is_clipped_to_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(64, 20, area);
        assert!(popup.width <= 40);
        assert!(popup.height <= 10);
    }
}
