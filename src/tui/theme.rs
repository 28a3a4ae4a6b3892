//! Styled and plain color themes

use crate::game::Hue;
use ratatui::prelude::*;

/// Map a game color tag to a terminal color.
pub fn hue_color(hue: Hue) -> Color {
    match hue {
        Hue::White => Color::White,
        Hue::Red => Color::Red,
        Hue::Green => Color::Green,
        Hue::Blue => Color::Blue,
        Hue::Yellow => Color::Yellow,
        Hue::Gray => Color::DarkGray,
    }
}

/// Styles for one screen. The plain theme carries no colors at all.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    styled: bool,
    accent: Hue,
}

impl Theme {
    pub fn styled(accent: Hue) -> Self {
        Self {
            styled: true,
            accent,
        }
    }

    pub fn plain() -> Self {
        Self {
            styled: false,
            accent: Hue::White,
        }
    }

    /// Foreground in `hue`, or the default style when plain
    pub fn fg(&self, hue: Hue) -> Style {
        if self.styled {
            Style::default().fg(hue_color(hue))
        } else {
            Style::default()
        }
    }

    pub fn accent(&self) -> Style {
        self.fg(self.accent)
    }

    pub fn border(&self) -> Style {
        self.accent()
    }

    /// Cells revealed by the last turn
    pub fn highlight(&self) -> Style {
        if self.styled {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().bold()
        }
    }

    pub fn hidden(&self) -> Style {
        self.fg(Hue::Gray)
    }

    pub fn letter(&self) -> Style {
        self.fg(Hue::White)
    }
}
