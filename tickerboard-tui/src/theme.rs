//! Neon-on-charcoal palette and style helpers for the quote board.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headers, active sort column)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (stale data, notices)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, placeholders)

use ratatui::style::{Color, Modifier, Style};

use tickerboard_core::Rgb;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Header cell style; the sorted column stands out.
pub fn header(sorted: bool) -> Style {
    if sorted {
        accent_bold().add_modifier(Modifier::UNDERLINED)
    } else {
        accent_bold()
    }
}

pub fn selected_row() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn cursor_column() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn link() -> Style {
    accent().add_modifier(Modifier::UNDERLINED)
}

/// Terminal color for a core RGB triple.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Daily-change cell: interpolated background, black text.
pub fn change_cell(color: Option<Rgb>) -> Style {
    match color {
        Some(c) => Style::default().bg(rgb(c)).fg(Color::Black),
        None => text(),
    }
}

/// Foreground for a signed value (gains green, losses pink).
pub fn pnl(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}
