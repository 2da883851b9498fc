//! Task store
//!
//! Single source of truth for the task list. Rehydrated once from storage at
//! construction and written through on every mutation.

use crate::domain::{filter_tasks, Filter, Task};
use crate::error::{TaskError, TaskResult};
use crate::persistence::{KeyValueStore, TASKS_KEY};
use crate::report::{calculate_task_stats, TaskStats};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Rehydrate from storage. Missing or corrupt data yields an empty list.
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => match parse_task_list(&raw) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(error = %e, "stored task list is unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read task list, starting empty");
                Vec::new()
            }
        };

        info!(count = tasks.len(), "task store loaded");
        Self { storage, tasks }
    }

    /// All tasks, most recent first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// IDs whose textual form starts with `prefix` (hyphens optional)
    pub fn ids_matching(&self, prefix: &str) -> Vec<Uuid> {
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Vec::new();
        }
        self.tasks
            .iter()
            .filter(|task| task.id.simple().to_string().starts_with(&needle))
            .map(|task| task.id)
            .collect()
    }

    /// Validate and prepend a new task
    pub fn add(&mut self, title: &str, subject: &str, deadline: &str) -> TaskResult<Task> {
        let task = Task::new(title, subject, deadline)?;
        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());
        self.commit(next)?;
        debug!(id = %task.id, "task added");
        Ok(task)
    }

    /// Flip completion. Returns false when no task has this ID.
    pub fn toggle(&mut self, id: Uuid) -> TaskResult<bool> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        let mut next = self.tasks.clone();
        next[index].toggle();
        let completed = next[index].completed;
        self.commit(next)?;
        debug!(id = %id, completed, "task toggled");
        Ok(true)
    }

    /// Remove a task. Returns false when no task has this ID.
    pub fn delete(&mut self, id: Uuid) -> TaskResult<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next: Vec<Task> = self.tasks.iter().filter(|task| task.id != id).cloned().collect();
        self.commit(next)?;
        debug!(id = %id, "task deleted");
        Ok(true)
    }

    /// Remove every task. Callers must confirm with the user first.
    pub fn clear_all(&mut self) -> TaskResult<()> {
        let removed = self.tasks.len();
        self.commit(Vec::new())?;
        info!(removed, "all tasks cleared");
        Ok(())
    }

    /// Human-readable, re-importable JSON of the current list
    pub fn export_snapshot(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.tasks).context("Failed to serialize tasks")
    }

    /// Replace the whole list with an imported payload.
    /// Nothing changes unless every record is valid and the write succeeds.
    pub fn import_replace(&mut self, payload: &str) -> TaskResult<usize> {
        let tasks = parse_task_list(payload)?;
        let count = tasks.len();
        self.commit(tasks)?;
        info!(count, "tasks imported");
        Ok(count)
    }

    pub fn filter(&self, filter: Filter) -> Vec<&Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        calculate_task_stats(&self.tasks, today)
    }

    /// Write `next` to storage, then adopt it. A failed write leaves memory untouched.
    fn commit(&mut self, next: Vec<Task>) -> TaskResult<()> {
        let json = serde_json::to_string(&next).context("Failed to serialize tasks")?;
        self.storage.set(TASKS_KEY, &json)?;
        self.tasks = next;
        Ok(())
    }
}

/// Parse and validate a JSON array of task records
pub fn parse_task_list(payload: &str) -> TaskResult<Vec<Task>> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| TaskError::InvalidImport(format!("not valid JSON ({})", e)))?;

    let serde_json::Value::Array(records) = value else {
        return Err(TaskError::InvalidImport(
            "expected a JSON array of tasks".to_string(),
        ));
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let task: Task = serde_json::from_value(record)
            .map_err(|e| TaskError::InvalidImport(format!("record {}: {}", index, e)))?;
        task.validate()
            .map_err(|e| TaskError::InvalidImport(format!("record {}: {}", index, e)))?;
        if !seen.insert(task.id) {
            return Err(TaskError::InvalidImport(format!(
                "record {}: duplicate id {}",
                index, task.id
            )));
        }
        tasks.push(task);
    }

    Ok(tasks)
}
