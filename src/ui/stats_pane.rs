use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, quote_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), title_style()),
        Span::styled(value, default_style()),
    ])
}

/// Render the dashboard statistics and the session quote
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.stats();
    let achievements = app.achievements();
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();

    let mut lines = vec![
        stat_line("Total tasks", stats.total.to_string()),
        stat_line("Completed", stats.completed.to_string()),
        stat_line("Remaining", stats.pending.to_string()),
        stat_line("Progress", format!("{}%", stats.completion_rate)),
        stat_line("Productivity", stats.productivity().name().to_string()),
        stat_line(
            "Due today",
            format!("{} / {}", stats.due_today_completed, stats.due_today),
        ),
        stat_line(
            "Achievements",
            format!("{} / {}", unlocked, achievements.len()),
        ),
        Line::raw(""),
    ];

    lines.push(Line::styled(format!("\"{}\"", app.quote.text), quote_style()));
    lines.push(Line::styled(format!("  - {}", app.quote.author), quote_style()));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Dashboard ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
