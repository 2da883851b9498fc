use crate::error::{TaskError, TaskResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date format used for deadlines on disk and in user input
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A single trackable to-do item
///
/// Field names serialize in camelCase so exported files stay compatible with
/// the browser version of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID, assigned by the store at creation
    pub id: Uuid,
    /// Display title (never empty after trimming)
    pub title: String,
    /// Free-form category
    pub subject: String,
    /// Calendar date the task is due
    pub deadline: NaiveDate,
    /// Whether the task is done
    pub completed: bool,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
}

impl Task {
    /// Build a new pending task, validating and trimming the caller's fields
    pub fn new(title: &str, subject: &str, deadline: &str) -> TaskResult<Self> {
        let title = required("title", title)?;
        let subject = required("subject", subject)?;
        let deadline = parse_deadline(deadline)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            subject,
            deadline,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        })
    }

    /// Check the invariants a record must satisfy to live in the store
    pub fn validate(&self) -> TaskResult<()> {
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyField("title"));
        }
        if self.subject.trim().is_empty() {
            return Err(TaskError::EmptyField("subject"));
        }
        Ok(())
    }

    /// Flip the completed flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Whether the deadline falls on the given day
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.deadline == day
    }

    /// Pending and past its deadline
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.deadline < today
    }

    /// Deadline formatted as YYYY-MM-DD
    pub fn deadline_str(&self) -> String {
        self.deadline.format(DEADLINE_FORMAT).to_string()
    }

    /// First eight characters of the ID, enough to address a task from the CLI
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

fn required(field: &'static str, value: &str) -> TaskResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parse a YYYY-MM-DD deadline
pub fn parse_deadline(value: &str) -> TaskResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT)
        .map_err(|_| TaskError::InvalidDeadline(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DEADLINE_FORMAT).unwrap()
    }

    #[test]
    fn test_task_new() {
        let task = Task::new("  Read chapter 3 ", "Biology", "2026-10-20").unwrap();
        assert_eq!(task.title, "Read chapter 3");
        assert_eq!(task.subject, "Biology");
        assert_eq!(task.deadline, date("2026-10-20"));
        assert!(!task.completed);
        assert!(task.created_at > 0);
    }

    #[test]
    fn test_task_new_rejects_empty_fields() {
        assert!(matches!(
            Task::new("   ", "Biology", "2026-10-20"),
            Err(TaskError::EmptyField("title"))
        ));
        assert!(matches!(
            Task::new("Essay", "", "2026-10-20"),
            Err(TaskError::EmptyField("subject"))
        ));
    }

    #[test]
    fn test_task_new_rejects_bad_deadline() {
        assert!(matches!(
            Task::new("Essay", "English", "2026-02-30"),
            Err(TaskError::InvalidDeadline(_))
        ));
        assert!(matches!(
            Task::new("Essay", "English", "next week"),
            Err(TaskError::InvalidDeadline(_))
        ));
        assert!(matches!(
            Task::new("Essay", "English", ""),
            Err(TaskError::InvalidDeadline(_))
        ));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut task = Task::new("Essay", "English", "2026-10-20").unwrap();
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_overdue_and_due() {
        let mut task = Task::new("Essay", "English", "2026-10-17").unwrap();
        assert!(task.is_overdue(date("2026-10-18")));
        assert!(!task.is_overdue(date("2026-10-17")));
        assert!(task.is_due_on(date("2026-10-17")));

        task.completed = true;
        assert!(!task.is_overdue(date("2026-10-18")));
    }

    #[test]
    fn test_serialized_shape() {
        let task = Task::new("Essay", "English", "2026-10-20").unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["deadline"], "2026-10-20");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_i64());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_short_id() {
        let task = Task::new("Essay", "English", "2026-10-20").unwrap();
        assert_eq!(task.short_id().len(), 8);
        assert!(task.id.to_string().starts_with(&task.short_id()));
    }
}
