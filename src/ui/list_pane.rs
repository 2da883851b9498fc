use crate::app::AppState;
use crate::domain::{deadline_label, status_badge, Filter, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, overdue_style, pending_style,
    selected_style, subject_style, title_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

/// Render the task list pane with its filter tabs
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = app.visible_tasks();
    let title = format!(" FocusFlow Tasks ({}) ", app.tasks.tasks().len());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Filter tabs
            Constraint::Min(0),    // Rows
        ])
        .split(inner);

    let selected_tab = Filter::all()
        .iter()
        .position(|filter| *filter == app.filter)
        .unwrap_or(0);
    let titles: Vec<&str> = Filter::all().iter().map(|filter| filter.name()).collect();
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .style(hint_style())
        .highlight_style(title_style())
        .divider("|");
    f.render_widget(tabs, chunks[0]);

    if visible.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No tasks here. Press 'a' to add one.",
            hint_style(),
        ));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, app.today);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items), chunks[1]);
}

/// Create a single line for a task
/// Format: ○ PENDING  Read chapter 4  [Biology]  Oct 20 (overdue)
fn create_task_line(task: &Task, today: NaiveDate) -> Line<'static> {
    let badge_style = if task.completed {
        done_style()
    } else {
        pending_style()
    };
    let deadline_style = if task.is_overdue(today) {
        overdue_style()
    } else {
        hint_style()
    };

    Line::from(vec![
        Span::styled(format!("{:<10}", status_badge(task)), badge_style),
        Span::raw(task.title.clone()),
        Span::raw("  "),
        Span::styled(format!("[{}]", task.subject), subject_style()),
        Span::raw("  "),
        Span::styled(deadline_label(task, today), deadline_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let task = Task::new("Read chapter 4", "Biology", "2026-10-20").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let text = line_text(&create_task_line(&task, today));

        assert!(text.contains("PENDING"));
        assert!(text.contains("Read chapter 4"));
        assert!(text.contains("[Biology]"));
        assert!(text.contains("Oct 20"));
    }

    #[test]
    fn test_overdue_line() {
        let task = Task::new("Lab report", "Chemistry", "2026-10-01").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let line = create_task_line(&task, today);

        assert!(line_text(&line).contains("(overdue)"));
        assert_eq!(line.spans[5].style, overdue_style());
    }
}
