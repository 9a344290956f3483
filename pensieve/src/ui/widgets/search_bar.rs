//! Search input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::ArchiveTheme;

/// Single-line search field with a visible cursor.
pub struct SearchBarWidget<'a> {
    content: &'a str,
    cursor: usize,
    placeholder: &'a str,
    is_active: bool,
    theme: &'a ArchiveTheme,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(content: &'a str, theme: &'a ArchiveTheme) -> Self {
        Self {
            content,
            cursor: content.chars().count(),
            placeholder: "Type to search...",
            is_active: false,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for SearchBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.content.is_empty() && !self.is_active {
            Line::from(vec![
                Span::raw("/ "),
                Span::styled(self.placeholder, self.theme.dim_style()),
            ])
        } else {
            // Character-based slicing keeps the cursor unicode-safe.
            let before: String = self.content.chars().take(self.cursor).collect();
            let at = self
                .content
                .chars()
                .nth(self.cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after: String = self
                .content
                .chars()
                .skip(self.cursor + 1)
                .collect();

            let cursor_style = if self.is_active {
                Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::raw("/ "),
                Span::raw(before),
                Span::styled(at, cursor_style),
                Span::raw(after),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
