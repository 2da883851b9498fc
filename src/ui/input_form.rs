use crate::app::AppState;
use crate::notifications::Permission;
use crate::settings::{MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES, MIN_BREAK_MINUTES, MIN_FOCUS_MINUTES};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label plus "> value█" for one text field
fn text_field<'a>(label: &str, value: &'a str, editing: bool) -> [Line<'a>; 3] {
    let label = if editing {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };
    [
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value, modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]),
        Line::raw(""),
    ]
}

fn checkbox(label: &str, checked: bool, editing: bool) -> Line<'static> {
    let marker = if editing { "> " } else { "  " };
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(mark, modal_title_style()),
        Span::raw(format!(" {}", label)),
    ])
}

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, 14);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        lines.extend(text_field("Title", &form.title, form.editing_field == 0));
        lines.extend(text_field("Subject", &form.subject, form.editing_field == 1));
        lines.extend(text_field(
            "Deadline (YYYY-MM-DD)",
            &form.deadline,
            form.editing_field == 2,
        ));
        lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the settings form
pub fn render_settings_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.settings_form {
        let modal_area = create_modal_area(area, 16);
        f.render_widget(Clear, modal_area);

        let mut lines = vec![
            Line::raw(""),
            checkbox("Desktop notifications", form.notifications_enabled, form.editing_field == 0),
            checkbox("Sound on completion", form.sound_enabled, form.editing_field == 1),
        ];
        if app.notification_permission() == Permission::Denied {
            lines.push(Line::raw("  (desktop notifications unavailable, alerts show in the app)"));
        }
        lines.push(Line::raw(""));
        lines.extend(text_field(
            &format!("Focus minutes ({}-{})", MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES),
            &form.focus_minutes,
            form.editing_field == 2,
        ));
        lines.extend(text_field(
            &format!("Break minutes ({}-{})", MIN_BREAK_MINUTES, MAX_BREAK_MINUTES),
            &form.break_minutes,
            form.editing_field == 3,
        ));
        lines.push(Line::raw("A running session keeps its length until it ends or is reset."));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Settings ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
