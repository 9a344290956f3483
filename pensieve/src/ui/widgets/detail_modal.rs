//! The shared detail overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::{DetailModal, ModalFocus};
use crate::ui::theme::ArchiveTheme;

/// Popup dimensions; the event layer recomputes the same rect for
/// backdrop-click detection.
pub const MODAL_WIDTH: u16 = 64;
pub const MODAL_HEIGHT: u16 = 20;

pub struct DetailModalWidget<'a> {
    modal: &'a DetailModal,
    theme: &'a ArchiveTheme,
}

impl<'a> DetailModalWidget<'a> {
    pub fn new(modal: &'a DetailModal, theme: &'a ArchiveTheme) -> Self {
        Self { modal, theme }
    }
}

impl Widget for DetailModalWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = &self.modal.view;

        let block = Block::default()
            .title(format!(" {} ", view.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Scrollable body
                Constraint::Length(1), // Close control
            ])
            .split(inner);

        let mut lines: Vec<Line> = Vec::new();

        if !view.badges.is_empty() {
            let badges = view
                .badges
                .iter()
                .map(|b| format!("[{b}]"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(badges, self.theme.badge_style())));
        }

        for (label, value) in &view.meta {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), self.theme.dim_style()),
                Span::raw(value.clone()),
            ]));
        }

        lines.push(Line::from(Span::styled(
            format!("img: {}", view.image),
            self.theme.dim_style(),
        )));
        lines.push(Line::from(""));

        let summary_style = if view.summary == pensieve_core::SPOILER_PLACEHOLDER {
            self.theme.spoiler_style()
        } else {
            Style::default().fg(self.theme.text)
        };
        lines.push(Line::from(Span::styled(view.summary.clone(), summary_style)));
        lines.push(Line::from(""));

        for detail in &view.details {
            lines.push(Line::from(vec![
                Span::styled("- ", self.theme.dim_style()),
                Span::raw(detail.clone()),
            ]));
        }

        let body_focused = self.modal.focus == ModalFocus::Body;
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((self.modal.scroll as u16, 0));
        body.render(chunks[0], buf);

        let close_style = if self.modal.focus == ModalFocus::Close {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            self.theme.dim_style()
        };
        let hint = if body_focused {
            "[ Close (Esc) ]  j/k scroll"
        } else {
            "[ Close (Esc) ]"
        };
        Paragraph::new(Line::from(Span::styled(hint, close_style)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}
