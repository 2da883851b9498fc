use crate::app::AppState;
use crate::ui::{
    layout::{create_modal_area, create_toast_area},
    styles::{done_style, locked_style, modal_bg_style, modal_title_style, toast_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(modal_bg_style())
}

/// Render the clear-all confirmation
pub fn render_confirm_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, 9);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!(
            "  Delete all {} tasks? This cannot be undone.",
            app.tasks.tasks().len()
        )),
        Line::raw("  Export first if you want a backup."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear everything  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep my tasks"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" ⚠ Clear All Tasks "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the import path prompt
pub fn render_import_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, 9);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  Path to a FocusFlow export (.json):"),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(app.import_path.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]),
        Line::raw(""),
        Line::raw("  Importing replaces the current task list."),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Import Tasks "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the achievements list
pub fn render_achievements_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let achievements = app.achievements();
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let modal_area = create_modal_area(area, achievements.len() as u16 + 6);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  {} / {} unlocked", unlocked, achievements.len())),
        Line::raw(""),
    ];

    for achievement in &achievements {
        let (icon, style) = if achievement.unlocked {
            ("🏆", done_style())
        } else {
            ("🔒", locked_style())
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", icon)),
            Span::styled(achievement.title, style),
            Span::styled(format!("  {}", achievement.description), locked_style()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Achievements "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the active toast, if any
pub fn render_toast(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(toast) = &app.toast {
        let width = (toast.message.chars().count() as u16).saturating_add(4);
        let toast_area = create_toast_area(area, width);
        f.render_widget(Clear, toast_area);

        let paragraph = Paragraph::new(Line::raw(toast.message.as_str()))
            .block(Block::default().borders(Borders::ALL))
            .style(toast_style(toast.kind));

        f.render_widget(paragraph, toast_area);
    }
}
