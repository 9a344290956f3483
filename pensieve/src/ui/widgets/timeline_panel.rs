//! Chronology panel: derived entries grouped by exact year.

use pensieve_core::YearGroup;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::theme::ArchiveTheme;

pub struct TimelinePanelWidget<'a> {
    groups: &'a [YearGroup],
    scroll: usize,
    show_spoilers: bool,
    theme: &'a ArchiveTheme,
}

impl<'a> TimelinePanelWidget<'a> {
    pub fn new(groups: &'a [YearGroup], theme: &'a ArchiveTheme) -> Self {
        Self {
            groups,
            scroll: 0,
            show_spoilers: false,
            theme,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn show_spoilers(mut self, show: bool) -> Self {
        self.show_spoilers = show;
        self
    }
}

impl Widget for TimelinePanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Chronology ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for group in self.groups {
            lines.push(Line::from(Span::styled(
                format!("=== {} ===", group.year),
                self.theme.title_style(),
            )));
            for entry in &group.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        entry.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", entry.kind.label()), self.theme.dim_style()),
                ]));

                let summary = entry.display_summary(self.show_spoilers);
                let summary_style = if summary == pensieve_core::SPOILER_PLACEHOLDER {
                    self.theme.spoiler_style()
                } else {
                    Style::default().fg(self.theme.text)
                };
                lines.push(Line::from(Span::styled(summary.to_string(), summary_style)));

                if let Some(details) = &entry.details {
                    lines.push(Line::from(Span::styled(
                        details.clone(),
                        self.theme.dim_style(),
                    )));
                }
            }
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll as u16, 0))
            .render(inner, buf);
    }
}
