use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

fn hints_for(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            " ↑/↓ select",
            "Tab filter",
            "a add",
            "Enter done/undo",
            "d delete",
            "Space timer",
            "r reset",
            "s settings",
            "h achievements",
            "e export",
            "i import",
            "C clear",
            "q quit",
        ],
        UiMode::AddingTask => &[" Tab next field", "Enter save", "Esc cancel"],
        UiMode::EditingSettings => &[" Tab next field", "Space toggle", "Enter save", "Esc cancel"],
        UiMode::ConfirmClear => &[" y confirm", "n cancel"],
        UiMode::ImportPath => &[" Enter import", "Esc cancel"],
        UiMode::Achievements => &[" any key to close"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = Line::from(
        hints_for(mode)
            .iter()
            .map(|hint| Span::raw(format!("{}   ", hint)))
            .collect::<Vec<_>>(),
    );

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
