//! Scrolling card grid for the browse pages.

use pensieve_core::Card;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::theme::ArchiveTheme;

/// Rows each card occupies, including its border. The mouse hit-test in
/// the event layer relies on this being uniform.
pub const CARD_HEIGHT: u16 = 8;

/// One entry in the list: a projected card plus its accent color.
pub struct CardItem {
    pub card: Card,
    pub accent: Color,
}

/// Renders the visible window of cards, or the empty-state message.
pub struct CardListWidget<'a> {
    items: Vec<CardItem>,
    selected: usize,
    offset: usize,
    empty_message: &'a str,
    focused: bool,
    theme: &'a ArchiveTheme,
}

impl<'a> CardListWidget<'a> {
    pub fn new(items: Vec<CardItem>, theme: &'a ArchiveTheme) -> Self {
        Self {
            items,
            selected: 0,
            offset: 0,
            empty_message: "Nothing to show.",
            focused: false,
            theme,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CardListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.items.is_empty() {
            let message = Paragraph::new(Line::from(Span::styled(
                self.empty_message,
                self.theme.dim_style().add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

            let centered = Rect {
                y: area.y + area.height / 3,
                height: area.height.saturating_sub(area.height / 3).max(1),
                ..area
            };
            message.render(centered, buf);
            return;
        }

        let capacity = (area.height / CARD_HEIGHT) as usize;
        for (slot, index) in (self.offset..self.items.len()).take(capacity.max(1)).enumerate() {
            let item = &self.items[index];
            let card_area = Rect {
                x: area.x,
                y: area.y + (slot as u16) * CARD_HEIGHT,
                width: area.width,
                height: CARD_HEIGHT.min(area.height.saturating_sub((slot as u16) * CARD_HEIGHT)),
            };
            if card_area.height == 0 {
                break;
            }
            let is_selected = index == self.selected;
            render_card(item, is_selected, self.focused, self.theme, card_area, buf);
        }
    }
}

fn render_card(
    item: &CardItem,
    selected: bool,
    list_focused: bool,
    theme: &ArchiveTheme,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if selected {
        Style::default().fg(item.accent).add_modifier(if list_focused {
            Modifier::BOLD
        } else {
            Modifier::empty()
        })
    } else {
        theme.border_style(false)
    };

    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Tagline
            Constraint::Length(1), // Badges
            Constraint::Length(2), // Body
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let title = Line::from(vec![
        Span::styled(
            item.card.title.clone(),
            Style::default().fg(item.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("({})", item.card.kind.label()), theme.dim_style()),
    ]);
    Paragraph::new(title).render(chunks[0], buf);

    Paragraph::new(Line::from(Span::styled(
        item.card.tagline.clone(),
        theme.dim_style(),
    )))
    .render(chunks[1], buf);

    if !item.card.badges.is_empty() {
        let badges = item
            .card
            .badges
            .iter()
            .map(|b| format!("[{b}]"))
            .collect::<Vec<_>>()
            .join(" ");
        Paragraph::new(Line::from(Span::styled(badges, theme.badge_style())))
            .render(chunks[2], buf);
    }

    let body_style = if item.card.body == pensieve_core::SPOILER_PLACEHOLDER {
        theme.spoiler_style()
    } else {
        Style::default().fg(theme.text)
    };
    Paragraph::new(Line::from(Span::styled(item.card.body.clone(), body_style)))
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    if !item.card.footer.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            item.card.footer.join(" | "),
            theme.dim_style(),
        )))
        .render(chunks[4], buf);
    }
}
