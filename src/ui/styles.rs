use crate::domain::{TimerMode, ToastKind};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Pending status badge style
pub fn pending_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Overdue deadline style
pub fn overdue_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Subject badge style
pub fn subject_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Accent color per timer phase
pub fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Focus => Color::Magenta,
        TimerMode::Break => Color::Green,
    }
}

/// Countdown digits
pub fn clock_style(mode: TimerMode) -> Style {
    Style::default()
        .fg(mode_color(mode))
        .add_modifier(Modifier::BOLD)
}

/// Timer progress gauge style
pub fn gauge_style(mode: TimerMode) -> Style {
    Style::default().fg(mode_color(mode)).bg(Color::DarkGray)
}

/// Celebration banner
pub fn celebrate_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
}

/// Locked achievement
pub fn locked_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn quote_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::ITALIC)
}

/// Toast colors by kind
pub fn toast_style(kind: ToastKind) -> Style {
    let bg = match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
        ToastKind::Info => Color::Blue,
    };
    Style::default()
        .fg(Color::White)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}
