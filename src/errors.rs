//! Unified application error type.
//! Engine, storage, config and CLI all return AppError so that every
//! failure reaches the presentation layer the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Invalid timestamp in database: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Task name must not be empty")]
    EmptyTaskName,

    #[error("Project name must not be empty")]
    EmptyProjectName,

    #[error("Cannot {op} while the session is {state}")]
    InvalidState { op: &'static str, state: &'static str },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("A project named '{0}' already exists")]
    DuplicateProject(String),

    #[error("Task '{0}' is still open; stop it before deleting it")]
    ActiveTaskDeletion(String),

    // ---------------------------
    // Reconciliation
    // ---------------------------
    #[error(
        "Found {} open tasks (ids: {}); run `tasklogger db --repair` to close all but the newest",
        .0.len(),
        .0.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
    )]
    MultipleOpenTasks(Vec<i64>),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
