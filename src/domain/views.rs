use super::enums::Filter;
use super::task::Task;
use chrono::NaiveDate;

/// Tasks passing the filter, in store order
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .collect()
}

/// Format a second count as "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Short deadline label ("Oct 20"), flagged when overdue
pub fn deadline_label(task: &Task, today: NaiveDate) -> String {
    let date = task.deadline.format("%b %-d").to_string();
    if task.is_overdue(today) {
        format!("{} (overdue)", date)
    } else if task.is_due_on(today) {
        format!("{} (today)", date)
    } else {
        date
    }
}

/// Get status badge text
pub fn status_badge(task: &Task) -> &'static str {
    if task.completed {
        "✓ DONE"
    } else {
        "○ PENDING"
    }
}
