//! Error type shared by the store, the placement logic and the front-ends.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("subtask {subtask} not found on task {task}")]
    SubtaskNotFound { task: String, subtask: String },

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// The drop zone does not accept tasks.
    #[error("cannot drop onto {0}")]
    DropRejected(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("log file setup failed: {0}")]
    LogInit(#[from] tracing_appender::rolling::InitError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::task_not_found("abc");
        assert_eq!(err.to_string(), "task not found: abc");

        let err = PlannerError::SubtaskNotFound {
            task: "t1".to_string(),
            subtask: "s1".to_string(),
        };
        assert_eq!(err.to_string(), "subtask s1 not found on task t1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PlannerError = json_err.into();
        assert!(matches!(err, PlannerError::Json(_)));
    }
}
