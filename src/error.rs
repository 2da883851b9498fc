//! Error types for task store operations
//!
//! Application plumbing uses `anyhow`; the store reports failures callers
//! branch on (validation vs. storage) through `TaskError`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid deadline '{0}'. Use YYYY-MM-DD")]
    InvalidDeadline(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl TaskError {
    /// Validation failures leave prior state untouched
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TaskError::EmptyField("title").to_string(),
            "title must not be empty"
        );
        assert_eq!(
            TaskError::InvalidDeadline("tomorrow".to_string()).to_string(),
            "Invalid deadline 'tomorrow'. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(TaskError::EmptyField("subject").is_validation());
        assert!(TaskError::InvalidImport("not an array".to_string()).is_validation());
        assert!(!TaskError::Storage(anyhow::anyhow!("disk full")).is_validation());
    }
}
