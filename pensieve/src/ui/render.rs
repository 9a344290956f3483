//! Render orchestration for the archive browser.

use pensieve_core::{house_card, wizard_card, House, Wizard, NO_HOUSES_MESSAGE, NO_WIZARDS_MESSAGE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FocusedPane, Page};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::theme::ArchiveTheme;
use crate::ui::widgets::{
    CardItem, CardListWidget, DetailModalWidget, SearchBarWidget, TimelinePanelWidget,
    MODAL_HEIGHT, MODAL_WIDTH,
};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App, theme: &ArchiveTheme) {
    let area = frame.area();
    let layout = AppLayout::calculate(area, app.notice_visible(), app.search_visible());

    render_title_bar(frame, app, theme, layout.title_bar);

    if let Some(notice_area) = layout.notice_bar {
        render_notice(frame, theme, notice_area);
    }

    if let Some(search_area) = layout.search_bar {
        let search = app.active_search();
        let placeholder = match app.page {
            Page::Houses => "Search houses by name, founder, or summary...",
            _ => "Search wizards by name, alias, or summary...",
        };
        let widget = SearchBarWidget::new(search.text(), theme)
            .cursor(search.cursor())
            .placeholder(placeholder)
            .active(app.focused == FocusedPane::Search && !app.has_modal());
        frame.render_widget(widget, search_area);
    }

    if let Some(filter_area) = layout.filter_bar {
        render_filter_bar(frame, app, theme, filter_area);
    }

    match app.page {
        Page::Overview => render_overview(frame, app, theme, layout.content),
        Page::Houses => render_houses(frame, app, theme, layout.content),
        Page::Wizards => render_wizards(frame, app, theme, layout.content),
        Page::Timeline => {
            let widget = TimelinePanelWidget::new(&app.timeline, theme)
                .scroll(app.timeline_scroll)
                .show_spoilers(app.show_spoilers);
            frame.render_widget(widget, layout.content);
        }
    }

    render_status_bar(frame, app, theme, layout.status_bar);
    render_hotkey_bar(frame, app, theme, layout.hotkey_bar);

    if let Some(modal) = app.modal() {
        let popup = centered_rect_fixed(MODAL_WIDTH, MODAL_HEIGHT, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(DetailModalWidget::new(modal, theme), popup);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let mut spans = vec![Span::styled(" Pensieve ", theme.title_style())];
    for page in Page::all() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", page.title()),
            theme.tab_style(page == app.page),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice(frame: &mut Frame, theme: &ArchiveTheme, area: Rect) {
    let notice = Line::from(Span::styled(
        " Spoilers are hidden by default. Press s to toggle them, x to dismiss this notice. ",
        theme.notice_style(),
    ));
    frame.render_widget(Paragraph::new(notice), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let line = match app.page {
        Page::Houses => {
            let traits = if app.house_filters.traits.is_empty() {
                "all".to_string()
            } else {
                app.house_filters.traits.join(" + ")
            };
            Line::from(vec![
                Span::styled(" Traits: ", theme.dim_style()),
                Span::styled(traits, theme.badge_style()),
                Span::styled("  (digits toggle, c clears)", theme.dim_style()),
            ])
        }
        Page::Wizards => {
            let house = app.wizard_filters.house.as_deref().unwrap_or("all");
            let year = app
                .wizard_filters
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "all".to_string());
            Line::from(vec![
                Span::styled(" House: ", theme.dim_style()),
                Span::styled(house.to_string(), theme.badge_style()),
                Span::styled("  Year: ", theme.dim_style()),
                Span::styled(year, theme.badge_style()),
                Span::styled("  (f house, y year, c clears)", theme.dim_style()),
            ])
        }
        _ => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn house_accent(house: &House, theme: &ArchiveTheme) -> Color {
    house
        .colors
        .first()
        .map(|c| theme.house_color(c))
        .unwrap_or(theme.accent_fallback)
}

fn wizard_accent(app: &App, wizard: &Wizard, theme: &ArchiveTheme) -> Color {
    app.catalog
        .resolve_house(&wizard.house)
        .map(|h| house_accent(h, theme))
        .unwrap_or(theme.accent_fallback)
}

fn render_houses(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let items: Vec<CardItem> = app
        .visible_houses
        .iter()
        .map(|&ix| {
            let house = &app.catalog.houses()[ix];
            CardItem {
                card: house_card(house),
                accent: house_accent(house, theme),
            }
        })
        .collect();

    let widget = CardListWidget::new(items, theme)
        .selected(app.houses_cursor.selected)
        .offset(app.houses_cursor.offset)
        .empty_message(NO_HOUSES_MESSAGE)
        .focused(app.focused == FocusedPane::Cards && !app.has_modal());
    frame.render_widget(widget, area);
}

fn render_wizards(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let items: Vec<CardItem> = app
        .visible_wizards
        .iter()
        .map(|&ix| {
            let wizard = &app.catalog.wizards()[ix];
            CardItem {
                card: wizard_card(wizard, app.show_spoilers),
                accent: wizard_accent(app, wizard, theme),
            }
        })
        .collect();

    let widget = CardListWidget::new(items, theme)
        .selected(app.wizards_cursor.selected)
        .offset(app.wizards_cursor.offset)
        .empty_message(NO_WIZARDS_MESSAGE)
        .focused(app.focused == FocusedPane::Cards && !app.has_modal());
    frame.render_widget(widget, area);
}

/// Featured entries plus catalog counts, in the spirit of the archive's
/// front page.
fn render_overview(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    let counts = Line::from(vec![
        Span::styled(" The archive holds ", theme.dim_style()),
        Span::styled(
            format!("{} houses", app.catalog.houses().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" and ", theme.dim_style()),
        Span::styled(
            format!("{} wizards", app.catalog.wizards().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(". Use the arrow keys to browse the pages.", theme.dim_style()),
    ]);
    frame.render_widget(Paragraph::new(counts).wrap(Wrap { trim: true }), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    if let Some(house) = app.catalog.houses().first() {
        let items = vec![CardItem {
            card: house_card(house),
            accent: house_accent(house, theme),
        }];
        let widget = CardListWidget::new(items, theme).empty_message("");
        frame.render_widget(widget, columns[0]);
    }

    if let Some(wizard) = app.catalog.wizards().first() {
        let items = vec![CardItem {
            card: wizard_card(wizard, app.show_spoilers),
            accent: wizard_accent(app, wizard, theme),
        }];
        let widget = CardListWidget::new(items, theme).empty_message("");
        frame.render_widget(widget, columns[1]);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let mut spans = Vec::new();

    if let Some(count) = app.result_count() {
        let noun = match app.page {
            Page::Houses => "houses",
            _ => "wizards",
        };
        spans.push(Span::styled(
            format!(" {count} {noun} shown"),
            Style::default(),
        ));
        spans.push(Span::styled(" | ", theme.dim_style()));
    }

    spans.push(Span::styled(
        format!("Spoilers: {}", if app.show_spoilers { "On" } else { "Off" }),
        if app.show_spoilers {
            theme.notice_style()
        } else {
            theme.dim_style()
        },
    ));

    if let Some(message) = app.status_message() {
        spans.push(Span::styled(" | ", theme.dim_style()));
        spans.push(Span::styled(message.to_string(), theme.notice_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hotkey_bar(frame: &mut Frame, app: &App, theme: &ArchiveTheme, area: Rect) {
    let keys = if app.has_modal() {
        " Esc close | Tab cycle focus | j/k scroll"
    } else if app.focused == FocusedPane::Search {
        " Esc/Enter done | type to search"
    } else {
        match app.page {
            Page::Overview => " Left/Right pages | s spoilers | q quit",
            Page::Houses => " / search | j/k move | Enter details | 1-9 traits | Left/Right pages | q quit",
            Page::Wizards => {
                " / search | j/k move | Enter details | f house | y year | s spoilers | q quit"
            }
            Page::Timeline => " j/k scroll | g/G top/bottom | s spoilers | Left/Right pages | q quit",
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(keys, theme.dim_style()))),
        area,
    );
}
