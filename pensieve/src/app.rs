//! Application state and logic for the archive browser.

use pensieve_core::{
    house_detail, matches_house, matches_wizard, wizard_detail, Catalog, DetailView, EntityKind,
    EntityRef, FilterState, PrefStore, YearGroup, SPOILERS_ENABLED, SPOILER_BANNER_DISMISSED,
};

/// The four rendering surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Houses,
    Wizards,
    Timeline,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Houses,
            Page::Houses => Page::Wizards,
            Page::Wizards => Page::Timeline,
            Page::Timeline => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::Timeline,
            Page::Houses => Page::Overview,
            Page::Wizards => Page::Houses,
            Page::Timeline => Page::Wizards,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Houses => "Houses",
            Page::Wizards => "Wizards",
            Page::Timeline => "Timeline",
        }
    }

    pub fn all() -> [Page; 4] {
        [Page::Overview, Page::Houses, Page::Wizards, Page::Timeline]
    }
}

/// Which pane receives keys on the browse pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPane {
    Search,
    #[default]
    Cards,
}

/// Focusable controls inside the detail overlay. Tab cycles between them
/// and never leaves the overlay while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalFocus {
    #[default]
    Close,
    Body,
}

impl ModalFocus {
    pub fn next(&self) -> Self {
        match self {
            ModalFocus::Close => ModalFocus::Body,
            ModalFocus::Body => ModalFocus::Close,
        }
    }
}

/// The single shared detail overlay. `None` on the `App` means closed.
#[derive(Debug, Clone)]
pub struct DetailModal {
    pub view: DetailView,
    pub focus: ModalFocus,
    pub scroll: usize,
    /// Pane that had focus when the overlay opened; restored on close.
    prev_focus: FocusedPane,
}

/// Search text buffer with a character-indexed cursor (unicode-safe).
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    buffer: String,
    cursor: usize,
}

impl SearchInput {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len());
        self.buffer.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if let Some((byte_pos, ch)) = self.buffer.char_indices().nth(self.cursor) {
                self.buffer.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.buffer.char_indices().nth(self.cursor) {
            self.buffer.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// Selection and scroll offset for a card list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub offset: usize,
}

impl ListCursor {
    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn scroll_into_view(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }
}

/// Main application state.
///
/// Owns one `FilterState` per browse page; every input event mutates a
/// single field and triggers a full recomputation of the affected visible
/// set. The catalog itself is never mutated.
pub struct App {
    pub catalog: Catalog,
    pub prefs: PrefStore,

    pub page: Page,
    pub focused: FocusedPane,

    pub house_filters: FilterState,
    pub wizard_filters: FilterState,
    pub house_search: SearchInput,
    pub wizard_search: SearchInput,

    /// Indices into `catalog.houses()` passing the current filters.
    pub visible_houses: Vec<usize>,
    /// Indices into `catalog.wizards()` passing the current filters.
    pub visible_wizards: Vec<usize>,
    pub houses_cursor: ListCursor,
    pub wizards_cursor: ListCursor,

    pub timeline: Vec<YearGroup>,
    pub timeline_scroll: usize,

    pub trait_options: Vec<String>,
    pub house_options: Vec<String>,
    pub year_options: Vec<i32>,

    pub show_spoilers: bool,
    pub notice_dismissed: bool,

    modal: Option<DetailModal>,
    status_message: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, prefs: PrefStore) -> Self {
        let show_spoilers = prefs.flag(SPOILERS_ENABLED);
        let notice_dismissed = prefs.flag(SPOILER_BANNER_DISMISSED);

        let trait_options = catalog.trait_options();
        let house_options = catalog.house_options();
        let year_options = catalog.year_options();
        let timeline = pensieve_core::year_groups(&catalog);

        let mut house_filters = FilterState::default();
        house_filters.show_spoilers = show_spoilers;
        let mut wizard_filters = FilterState::default();
        wizard_filters.show_spoilers = show_spoilers;

        let mut app = Self {
            catalog,
            prefs,
            page: Page::default(),
            focused: FocusedPane::default(),
            house_filters,
            wizard_filters,
            house_search: SearchInput::default(),
            wizard_search: SearchInput::default(),
            visible_houses: Vec::new(),
            visible_wizards: Vec::new(),
            houses_cursor: ListCursor::default(),
            wizards_cursor: ListCursor::default(),
            timeline,
            timeline_scroll: 0,
            trait_options,
            house_options,
            year_options,
            show_spoilers,
            notice_dismissed,
            modal: None,
            status_message: None,
        };
        app.refresh_houses();
        app.refresh_wizards();
        app
    }

    // =========================================================================
    // Result sets
    // =========================================================================

    /// Recompute the visible house set from the current filters.
    pub fn refresh_houses(&mut self) {
        self.visible_houses = self
            .catalog
            .houses()
            .iter()
            .enumerate()
            .filter(|(_, h)| matches_house(h, &self.house_filters))
            .map(|(ix, _)| ix)
            .collect();
        self.houses_cursor.clamp(self.visible_houses.len());
    }

    /// Recompute the visible wizard set from the current filters.
    pub fn refresh_wizards(&mut self) {
        self.visible_wizards = self
            .catalog
            .wizards()
            .iter()
            .enumerate()
            .filter(|(_, w)| matches_wizard(w, &self.wizard_filters))
            .map(|(ix, _)| ix)
            .collect();
        self.wizards_cursor.clamp(self.visible_wizards.len());
    }

    fn refresh_current(&mut self) {
        match self.page {
            Page::Houses => self.refresh_houses(),
            Page::Wizards => self.refresh_wizards(),
            _ => {}
        }
    }

    /// Number of results on the current page, if it is a browse page.
    pub fn result_count(&self) -> Option<usize> {
        match self.page {
            Page::Houses => Some(self.visible_houses.len()),
            Page::Wizards => Some(self.visible_wizards.len()),
            _ => None,
        }
    }

    // =========================================================================
    // Search editing
    // =========================================================================

    pub fn active_search(&self) -> &SearchInput {
        match self.page {
            Page::Wizards => &self.wizard_search,
            _ => &self.house_search,
        }
    }

    fn active_search_mut(&mut self) -> &mut SearchInput {
        match self.page {
            Page::Wizards => &mut self.wizard_search,
            _ => &mut self.house_search,
        }
    }

    fn sync_search(&mut self) {
        match self.page {
            Page::Houses => {
                let text = self.house_search.text().to_string();
                self.house_filters.set_search(&text);
                self.refresh_houses();
            }
            Page::Wizards => {
                let text = self.wizard_search.text().to_string();
                self.wizard_filters.set_search(&text);
                self.refresh_wizards();
            }
            _ => {}
        }
    }

    pub fn search_type_char(&mut self, c: char) {
        self.active_search_mut().type_char(c);
        self.sync_search();
    }

    pub fn search_backspace(&mut self) {
        self.active_search_mut().backspace();
        self.sync_search();
    }

    pub fn search_delete(&mut self) {
        self.active_search_mut().delete();
        self.sync_search();
    }

    pub fn search_cursor_left(&mut self) {
        self.active_search_mut().cursor_left();
    }

    pub fn search_cursor_right(&mut self) {
        self.active_search_mut().cursor_right();
    }

    pub fn search_cursor_home(&mut self) {
        self.active_search_mut().cursor_home();
    }

    pub fn search_cursor_end(&mut self) {
        self.active_search_mut().cursor_end();
    }

    // =========================================================================
    // Categorical filters
    // =========================================================================

    /// Toggle the nth trait option on the houses page (digit hotkeys).
    pub fn toggle_trait(&mut self, index: usize) {
        let Some(name) = self.trait_options.get(index).cloned() else {
            return;
        };
        self.house_filters.toggle_trait(&name);
        self.refresh_houses();
    }

    /// Advance the house filter: all, each house in order, back to all.
    pub fn cycle_house_filter(&mut self) {
        self.wizard_filters.house = cycle_option(&self.house_options, self.wizard_filters.house.take());
        self.refresh_wizards();
    }

    /// Advance the year filter: all, each year ascending, back to all.
    pub fn cycle_year_filter(&mut self) {
        self.wizard_filters.year = cycle_option(&self.year_options, self.wizard_filters.year.take());
        self.refresh_wizards();
    }

    /// Reset the current page's filters, keeping the spoiler flag.
    pub fn clear_filters(&mut self) {
        match self.page {
            Page::Houses => {
                self.house_search.clear();
                self.house_filters.search.clear();
                self.house_filters.traits.clear();
                self.refresh_houses();
            }
            Page::Wizards => {
                self.wizard_search.clear();
                self.wizard_filters.search.clear();
                self.wizard_filters.house = None;
                self.wizard_filters.year = None;
                self.refresh_wizards();
            }
            _ => {}
        }
    }

    /// Flip spoiler visibility. The preference is written synchronously
    /// before the result sets refresh.
    pub fn toggle_spoilers(&mut self) {
        let next = !self.show_spoilers;
        self.prefs.set_flag(SPOILERS_ENABLED, next);
        self.show_spoilers = next;
        self.house_filters.show_spoilers = next;
        self.wizard_filters.show_spoilers = next;
        self.refresh_houses();
        self.refresh_wizards();
    }

    /// Hide the spoiler notice permanently.
    pub fn dismiss_notice(&mut self) {
        if !self.notice_dismissed {
            self.prefs.set_flag(SPOILER_BANNER_DISMISSED, true);
            self.notice_dismissed = true;
        }
    }

    // =========================================================================
    // Page chrome
    // =========================================================================

    pub fn next_page(&mut self) {
        self.page = self.page.next();
        self.focused = FocusedPane::Cards;
        self.refresh_current();
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.previous();
        self.focused = FocusedPane::Cards;
        self.refresh_current();
    }

    /// Whether the spoiler notice bar is shown on the current page.
    pub fn notice_visible(&self) -> bool {
        !self.notice_dismissed && matches!(self.page, Page::Wizards | Page::Timeline)
    }

    /// Whether the current page has a search bar.
    pub fn search_visible(&self) -> bool {
        matches!(self.page, Page::Houses | Page::Wizards)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn current_cursor_mut(&mut self) -> Option<(&mut ListCursor, usize)> {
        match self.page {
            Page::Houses => Some((&mut self.houses_cursor, self.visible_houses.len())),
            Page::Wizards => Some((&mut self.wizards_cursor, self.visible_wizards.len())),
            _ => None,
        }
    }

    pub fn select_next(&mut self, visible: usize) {
        if self.page == Page::Timeline {
            self.timeline_scroll = (self.timeline_scroll + 1).min(self.timeline_line_estimate());
            return;
        }
        if let Some((cursor, len)) = self.current_cursor_mut() {
            if len > 0 && cursor.selected + 1 < len {
                cursor.selected += 1;
            }
            cursor.scroll_into_view(visible);
        }
    }

    pub fn select_prev(&mut self, visible: usize) {
        if self.page == Page::Timeline {
            self.timeline_scroll = self.timeline_scroll.saturating_sub(1);
            return;
        }
        if let Some((cursor, _)) = self.current_cursor_mut() {
            cursor.selected = cursor.selected.saturating_sub(1);
            cursor.scroll_into_view(visible);
        }
    }

    pub fn select_first(&mut self, visible: usize) {
        if self.page == Page::Timeline {
            self.timeline_scroll = 0;
            return;
        }
        if let Some((cursor, _)) = self.current_cursor_mut() {
            cursor.selected = 0;
            cursor.scroll_into_view(visible);
        }
    }

    pub fn select_last(&mut self, visible: usize) {
        if self.page == Page::Timeline {
            self.timeline_scroll = self.timeline_line_estimate();
            return;
        }
        if let Some((cursor, len)) = self.current_cursor_mut() {
            cursor.selected = len.saturating_sub(1);
            cursor.scroll_into_view(visible);
        }
    }

    /// Select a concrete row (mouse click), if it exists.
    pub fn select_index(&mut self, index: usize, visible: usize) -> bool {
        if let Some((cursor, len)) = self.current_cursor_mut() {
            if index < len {
                cursor.selected = index;
                cursor.scroll_into_view(visible);
                return true;
            }
        }
        false
    }

    /// Conservative upper bound for timeline scrolling: heading plus three
    /// lines per entry plus a blank line per group.
    fn timeline_line_estimate(&self) -> usize {
        self.timeline
            .iter()
            .map(|g| 2 + g.entries.len() * 3)
            .sum::<usize>()
            .saturating_sub(1)
    }

    /// The (kind, id) of the selected card on the current page.
    pub fn selected_entity(&self) -> Option<(EntityKind, String)> {
        match self.page {
            Page::Houses => {
                let ix = *self.visible_houses.get(self.houses_cursor.selected)?;
                Some((EntityKind::House, self.catalog.houses()[ix].id.clone()))
            }
            Page::Wizards => {
                let ix = *self.visible_wizards.get(self.wizards_cursor.selected)?;
                Some((EntityKind::Wizard, self.catalog.wizards()[ix].id.clone()))
            }
            _ => None,
        }
    }

    // =========================================================================
    // Detail modal
    // =========================================================================

    /// Open the overlay for an entity. Unknown ids are a silent no-op; an
    /// already-open overlay is simply replaced.
    pub fn open_modal(&mut self, kind: EntityKind, id: &str) {
        let view = match self.catalog.entity(kind, id) {
            Some(EntityRef::House(house)) => house_detail(house),
            Some(EntityRef::Wizard(wizard)) => wizard_detail(wizard, self.show_spoilers),
            None => return,
        };

        let prev_focus = match &self.modal {
            Some(open) => open.prev_focus,
            None => self.focused,
        };
        self.modal = Some(DetailModal {
            view,
            focus: ModalFocus::default(),
            scroll: 0,
            prev_focus,
        });
    }

    /// Open the overlay for the selected card.
    pub fn open_selected(&mut self) {
        if let Some((kind, id)) = self.selected_entity() {
            self.open_modal(kind, &id);
        }
    }

    /// Close the overlay and restore the previously focused pane.
    pub fn close_modal(&mut self) {
        if let Some(modal) = self.modal.take() {
            self.focused = modal.prev_focus;
        }
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal_cycle_focus(&mut self) {
        if let Some(modal) = &mut self.modal {
            modal.focus = modal.focus.next();
        }
    }

    pub fn modal_scroll_down(&mut self) {
        if let Some(modal) = &mut self.modal {
            let max = modal.view.meta.len() + modal.view.details.len() + 12;
            modal.scroll = (modal.scroll + 1).min(max);
        }
    }

    pub fn modal_scroll_up(&mut self) {
        if let Some(modal) = &mut self.modal {
            modal.scroll = modal.scroll.saturating_sub(1);
        }
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

/// Step an optional selection through `options`: `None` selects the first
/// option, the last option wraps back to `None` ("all").
fn cycle_option<T: Clone + PartialEq>(options: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => match options.iter().position(|o| *o == value) {
            Some(pos) if pos + 1 < options.len() => Some(options[pos + 1].clone()),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pensieve_core::SPOILER_PLACEHOLDER;
    use tempfile::TempDir;

    fn test_app() -> App {
        App::new(Catalog::builtin().clone(), PrefStore::in_memory())
    }

    #[test]
    fn unknown_id_open_is_a_silent_no_op() {
        let mut app = test_app();
        app.open_modal(EntityKind::Wizard, "tom-bombadil");
        assert!(!app.has_modal());
        app.open_modal(EntityKind::House, "harry-potter");
        assert!(!app.has_modal());
    }

    #[test]
    fn closing_the_modal_restores_prior_focus() {
        let mut app = test_app();
        app.page = Page::Wizards;
        app.focused = FocusedPane::Search;

        app.open_modal(EntityKind::Wizard, "harry-potter");
        assert!(app.has_modal());
        app.close_modal();
        assert_eq!(app.focused, FocusedPane::Search);
    }

    #[test]
    fn reopening_replaces_the_displayed_entity() {
        let mut app = test_app();
        app.open_modal(EntityKind::House, "gryffindor");
        app.open_modal(EntityKind::Wizard, "luna-lovegood");
        let modal = app.modal().unwrap();
        assert_eq!(modal.view.title, "Luna Lovegood");
        // Focus restoration still points at the original pane.
        app.close_modal();
        assert!(!app.has_modal());
    }

    #[test]
    fn modal_respects_current_spoiler_setting() {
        let mut app = test_app();
        app.open_modal(EntityKind::Wizard, "severus-snape");
        assert_eq!(app.modal().unwrap().view.summary, SPOILER_PLACEHOLDER);
        app.close_modal();

        app.toggle_spoilers();
        app.open_modal(EntityKind::Wizard, "severus-snape");
        assert_ne!(app.modal().unwrap().view.summary, SPOILER_PLACEHOLDER);
    }

    #[test]
    fn spoiler_toggle_persists_across_a_fresh_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut app = App::new(Catalog::builtin().clone(), PrefStore::open(&path));
        assert!(!app.show_spoilers);
        app.toggle_spoilers();

        let reloaded = App::new(Catalog::builtin().clone(), PrefStore::open(&path));
        assert!(reloaded.show_spoilers);
    }

    #[test]
    fn each_keystroke_narrows_the_result_set() {
        let mut app = test_app();
        app.page = Page::Wizards;
        for c in "luna".chars() {
            app.search_type_char(c);
        }
        assert_eq!(app.visible_wizards.len(), 1);
        app.search_backspace();
        assert_eq!(app.wizard_filters.search, "lun");
    }

    #[test]
    fn empty_result_set_is_reachable_and_recoverable() {
        let mut app = test_app();
        app.page = Page::Houses;
        for c in "zzz".chars() {
            app.search_type_char(c);
        }
        assert!(app.visible_houses.is_empty());

        app.clear_filters();
        assert_eq!(app.visible_houses.len(), 4);
    }

    #[test]
    fn trait_digits_toggle_and_narrow() {
        let mut app = test_app();
        app.page = Page::Houses;
        let bravery = app
            .trait_options
            .iter()
            .position(|t| t == "Bravery")
            .unwrap();
        app.toggle_trait(bravery);
        assert_eq!(app.visible_houses.len(), 1);
        app.toggle_trait(bravery);
        assert_eq!(app.visible_houses.len(), 4);
        // Out-of-range digits are ignored.
        app.toggle_trait(99);
        assert_eq!(app.visible_houses.len(), 4);
    }

    #[test]
    fn house_filter_cycles_through_all_options_and_back() {
        let mut app = test_app();
        app.page = Page::Wizards;
        assert_eq!(app.wizard_filters.house, None);
        for _ in 0..app.house_options.len() {
            app.cycle_house_filter();
            assert!(app.wizard_filters.house.is_some());
        }
        app.cycle_house_filter();
        assert_eq!(app.wizard_filters.house, None);
    }

    #[test]
    fn selection_is_clamped_when_results_shrink() {
        let mut app = test_app();
        app.page = Page::Wizards;
        app.wizards_cursor.selected = 8;
        app.cycle_house_filter(); // Gryffindor: 7 wizards
        assert!(app.wizards_cursor.selected < app.visible_wizards.len());
    }

    #[test]
    fn selected_entity_tracks_the_visible_set() {
        let mut app = test_app();
        app.page = Page::Wizards;
        app.wizard_filters.house = Some("Ravenclaw".to_string());
        app.refresh_wizards();
        let (kind, id) = app.selected_entity().unwrap();
        assert_eq!(kind, EntityKind::Wizard);
        assert_eq!(id, "luna-lovegood");
    }

    #[test]
    fn notice_dismissal_is_persisted_once() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut app = App::new(Catalog::builtin().clone(), PrefStore::open(&path));
        app.page = Page::Wizards;
        assert!(app.notice_visible());
        app.dismiss_notice();
        assert!(!app.notice_visible());

        let reloaded = App::new(Catalog::builtin().clone(), PrefStore::open(&path));
        assert!(reloaded.notice_dismissed);
    }
}
