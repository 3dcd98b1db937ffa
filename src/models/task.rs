use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub id: i64,
    pub name: String,                   // ⇔ tasks.name
    pub project: Option<String>,        // ⇔ projects.name via tasks.project_id
    pub start: NaiveDateTime,           // ⇔ tasks.start_time (TEXT, ISO local)
    pub end: Option<NaiveDateTime>,     // ⇔ tasks.end_time (NULL while open)
    pub duration_secs: i64,             // ⇔ tasks.duration_seconds
    pub completed: bool,                // ⇔ tasks.is_completed
}

impl TaskRecord {
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Identity used for deletion. Open tasks have no end and therefore no key.
    pub fn key(&self) -> Option<TaskKey> {
        self.end.map(|end| TaskKey {
            name: self.name.clone(),
            start: self.start,
            end,
        })
    }

    pub fn start_str(&self) -> String {
        format_timestamp(&self.start)
    }

    pub fn end_str(&self) -> Option<String> {
        self.end.as_ref().map(format_timestamp)
    }

    /// True if name and project both match exactly (no project ≠ any project).
    pub fn matches(&self, name: &str, project: Option<&str>) -> bool {
        self.name == name && self.project.as_deref() == project
    }
}

/// Name + time bounds of a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskKey {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
