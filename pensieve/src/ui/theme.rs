//! Color theme and styling for the archive browser.

use ratatui::style::{Color, Modifier, Style};

/// UI color theme.
#[derive(Debug, Clone)]
pub struct ArchiveTheme {
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
    pub text: Color,
    pub dim: Color,
    pub badge: Color,
    pub notice: Color,
    pub spoiler: Color,
    /// Accent used when a house color has no terminal mapping.
    pub accent_fallback: Color,
}

impl Default for ArchiveTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            title: Color::White,
            text: Color::White,
            dim: Color::DarkGray,
            badge: Color::Magenta,
            notice: Color::Yellow,
            spoiler: Color::DarkGray,
            accent_fallback: Color::LightBlue,
        }
    }
}

impl ArchiveTheme {
    /// Map a catalog color name to the nearest terminal color.
    pub fn house_color(&self, name: &str) -> Color {
        match name {
            "Scarlet" => Color::Red,
            "Gold" => Color::Yellow,
            "Emerald" => Color::Green,
            "Silver" => Color::Gray,
            "Blue" => Color::Blue,
            "Bronze" => Color::LightYellow,
            "Canary Yellow" => Color::LightYellow,
            "Black" => Color::DarkGray,
            _ => self.accent_fallback,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn tab_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim)
        }
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn badge_style(&self) -> Style {
        Style::default().fg(self.badge)
    }

    pub fn notice_style(&self) -> Style {
        Style::default().fg(self.notice)
    }

    /// Style for redacted summary text.
    pub fn spoiler_style(&self) -> Style {
        Style::default()
            .fg(self.spoiler)
            .add_modifier(Modifier::ITALIC)
    }
}
