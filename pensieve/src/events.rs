//! Event handling for the archive browser.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::{App, FocusedPane, Page};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{CARD_HEIGHT, MODAL_HEIGHT, MODAL_WIDTH};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    NeedsRedraw,
    Quit,
}

/// Handle a terminal event. `area` is the current terminal rect, used to
/// recompute the layout the renderer painted for mouse hit-testing.
pub fn handle_event(app: &mut App, event: Event, area: Rect) -> EventResult {
    let layout = AppLayout::calculate(area, app.notice_visible(), app.search_visible());
    let capacity = (layout.content.height / CARD_HEIGHT).max(1) as usize;

    match event {
        Event::Key(key) => handle_key_event(app, key, capacity),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse, &layout, area, capacity),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent, capacity: usize) -> EventResult {
    // The open overlay traps every key; nothing reaches the page behind it.
    if app.has_modal() {
        return handle_modal_key(app, key);
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.focused == FocusedPane::Search && app.search_visible() {
        return handle_search_key(app, key);
    }

    handle_browse_key(app, key, capacity)
}

/// Keys while the detail overlay is open. Tab cycles only between the
/// overlay's own controls; unhandled keys are swallowed, not forwarded.
fn handle_modal_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.close_modal();
            EventResult::NeedsRedraw
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.modal_cycle_focus();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if matches!(
                app.modal().map(|m| m.focus),
                Some(crate::app::ModalFocus::Close)
            ) {
                app.close_modal();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.modal_scroll_down();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.modal_scroll_up();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys while the search field is focused.
fn handle_search_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
            app.focused = FocusedPane::Cards;
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.search_cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.search_cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.search_cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.search_cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.search_backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.search_delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.search_type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys in normal browsing, outside the search field.
fn handle_browse_key(app: &mut App, key: KeyEvent, capacity: usize) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,

        KeyCode::Char('/') | KeyCode::Char('i') => {
            if app.search_visible() {
                app.focused = FocusedPane::Search;
                app.clear_status();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Tab => {
            if app.search_visible() {
                app.focused = FocusedPane::Search;
            }
            EventResult::NeedsRedraw
        }

        KeyCode::Left | KeyCode::Char('[') => {
            app.previous_page();
            EventResult::NeedsRedraw
        }
        KeyCode::Right | KeyCode::Char(']') => {
            app.next_page();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next(capacity);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev(capacity);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            app.select_first(capacity);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            app.select_last(capacity);
            EventResult::NeedsRedraw
        }

        KeyCode::Enter => {
            app.open_selected();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('s') => {
            app.toggle_spoilers();
            app.set_status(if app.show_spoilers {
                "Spoilers revealed"
            } else {
                "Spoilers hidden"
            });
            EventResult::NeedsRedraw
        }
        KeyCode::Char('x') => {
            if app.notice_visible() {
                app.dismiss_notice();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') => {
            app.clear_filters();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('f') => {
            if app.page == Page::Wizards {
                app.cycle_house_filter();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('y') => {
            if app.page == Page::Wizards {
                app.cycle_year_filter();
            }
            EventResult::NeedsRedraw
        }

        // Digits toggle trait badges on the houses page.
        KeyCode::Char(c @ '1'..='9') => {
            if app.page == Page::Houses {
                let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                app.toggle_trait(index);
            }
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(
    app: &mut App,
    mouse: MouseEvent,
    layout: &AppLayout,
    area: Rect,
    capacity: usize,
) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if app.has_modal() {
                app.modal_scroll_up();
            } else {
                app.select_prev(capacity);
            }
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            if app.has_modal() {
                app.modal_scroll_down();
            } else {
                app.select_next(capacity);
            }
            EventResult::NeedsRedraw
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position::new(mouse.column, mouse.row);
            if app.has_modal() {
                let popup = centered_rect_fixed(MODAL_WIDTH, MODAL_HEIGHT, area);
                // Backdrop click closes; a click inside the dialog does not.
                if !popup.contains(pos) {
                    app.close_modal();
                }
                return EventResult::NeedsRedraw;
            }

            if layout.search_bar.is_some_and(|r| r.contains(pos)) {
                app.focused = FocusedPane::Search;
                return EventResult::NeedsRedraw;
            }

            if layout.content.contains(pos) && matches!(app.page, Page::Houses | Page::Wizards) {
                app.focused = FocusedPane::Cards;
                let row = (pos.y - layout.content.y) / CARD_HEIGHT;
                let index = current_offset(app) + row as usize;
                if app.select_index(index, capacity) {
                    app.open_selected();
                }
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn current_offset(app: &App) -> usize {
    match app.page {
        Page::Houses => app.houses_cursor.offset,
        Page::Wizards => app.wizards_cursor.offset,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pensieve_core::{Catalog, EntityKind, PrefStore};

    fn test_app() -> App {
        App::new(Catalog::builtin().clone(), PrefStore::in_memory())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 30,
    };

    #[test]
    fn escape_closes_the_modal() {
        let mut app = test_app();
        app.open_modal(EntityKind::House, "gryffindor");
        handle_event(&mut app, key(KeyCode::Esc), AREA);
        assert!(!app.has_modal());
    }

    #[test]
    fn open_modal_traps_page_hotkeys() {
        let mut app = test_app();
        app.open_modal(EntityKind::House, "gryffindor");
        // 's' would toggle spoilers on the page; inside the modal it is
        // swallowed by the focus trap.
        handle_event(&mut app, key(KeyCode::Char('s')), AREA);
        assert!(!app.show_spoilers);
        assert!(app.has_modal());
        // 'q' must not quit from inside the modal either.
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Char('q')), AREA),
            EventResult::Continue
        );
    }

    #[test]
    fn tab_cycles_within_the_modal() {
        let mut app = test_app();
        app.page = Page::Wizards;
        app.open_modal(EntityKind::Wizard, "harry-potter");
        let before = app.modal().unwrap().focus;
        handle_event(&mut app, key(KeyCode::Tab), AREA);
        assert_ne!(app.modal().unwrap().focus, before);
        handle_event(&mut app, key(KeyCode::Tab), AREA);
        assert_eq!(app.modal().unwrap().focus, before);
        // Focus never left the overlay.
        assert!(app.has_modal());
    }

    #[test]
    fn backdrop_click_closes_but_inner_click_does_not() {
        let mut app = test_app();
        app.open_modal(EntityKind::House, "ravenclaw");

        let popup = centered_rect_fixed(MODAL_WIDTH, MODAL_HEIGHT, AREA);
        // Click inside the dialog box.
        handle_event(&mut app, click(popup.x + 2, popup.y + 2), AREA);
        assert!(app.has_modal());

        // Click on the overlay backdrop, outside the dialog box.
        handle_event(&mut app, click(0, 0), AREA);
        assert!(!app.has_modal());
    }

    #[test]
    fn clicking_a_card_opens_its_entity() {
        let mut app = test_app();
        app.page = Page::Houses;
        let layout = AppLayout::calculate(AREA, app.notice_visible(), app.search_visible());
        // Second card on screen.
        let row = layout.content.y + CARD_HEIGHT + 1;
        handle_event(&mut app, click(5, row), AREA);
        let modal = app.modal().expect("modal open");
        assert_eq!(modal.view.id, "hufflepuff");
    }

    #[test]
    fn search_keys_reach_the_filter_state() {
        let mut app = test_app();
        app.page = Page::Wizards;
        handle_event(&mut app, key(KeyCode::Char('/')), AREA);
        assert_eq!(app.focused, FocusedPane::Search);
        for c in "snape".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)), AREA);
        }
        assert_eq!(app.visible_wizards.len(), 1);
        handle_event(&mut app, key(KeyCode::Esc), AREA);
        assert_eq!(app.focused, FocusedPane::Cards);
    }

    #[test]
    fn spoiler_hotkey_toggles_and_reports() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Char('s')), AREA);
        assert!(app.show_spoilers);
        assert_eq!(app.status_message(), Some("Spoilers revealed"));
    }
}
