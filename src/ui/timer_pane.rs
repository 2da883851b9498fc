use crate::app::AppState;
use crate::domain::format_clock;
use crate::ui::styles::{border_style, celebrate_style, clock_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the Pomodoro timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.timer;
    let mode = timer.mode();
    let title = format!(" {} {} ", mode.symbol(), mode.label());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Clock and status
            Constraint::Length(1), // Progress gauge
        ])
        .split(inner);

    let status = if timer.is_running() { "Running" } else { "Paused" };
    let mut lines = vec![
        Line::raw(""),
        Line::styled(format_clock(timer.remaining_seconds()), clock_style(mode)),
        Line::styled(status, hint_style()),
    ];
    if app.is_celebrating() {
        lines.push(Line::styled("🎉 Focus session complete! 🎉", celebrate_style()));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    let percent = timer.progress_percent().min(100);
    let gauge = Gauge::default()
        .gauge_style(gauge_style(mode))
        .percent(percent)
        .label(format!("{}%", percent));
    f.render_widget(gauge, chunks[1]);
}
