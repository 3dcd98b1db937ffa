//! In-memory session state and the snapshot handed to observers.

use crate::models::TaskRecord;
use crate::utils::time::whole_seconds_between;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
        }
    }
}

/// The task a session is bound to. Name and project are copies of the
/// task row, taken when the session was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveTask {
    pub id: i64,
    pub name: String,
    pub project: Option<String>,
    pub started: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionState {
    pub active: Option<ActiveTask>,
    /// Start of the open tick window; `None` while paused or idle.
    pub window_start: Option<NaiveDateTime>,
    /// Seconds already persisted for the active task.
    pub prior_secs: i64,
    pub last_checkpoint: Option<NaiveDateTime>,
}

impl SessionState {
    pub fn running(active: ActiveTask, prior_secs: i64, now: NaiveDateTime) -> Self {
        Self {
            active: Some(active),
            window_start: Some(now),
            prior_secs,
            last_checkpoint: Some(now),
        }
    }

    /// Session restored from an unfinished task row: bound, not ticking.
    pub fn paused(record: &TaskRecord) -> Self {
        Self {
            active: Some(ActiveTask {
                id: record.id,
                name: record.name.clone(),
                project: record.project.clone(),
                started: record.start,
            }),
            window_start: None,
            prior_secs: record.duration_secs,
            last_checkpoint: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match (&self.active, self.window_start) {
            (None, _) => SessionStatus::Idle,
            (Some(_), Some(_)) => SessionStatus::Running,
            (Some(_), None) => SessionStatus::Paused,
        }
    }

    /// Whole seconds in the open tick window (0 unless running).
    pub fn open_secs(&self, now: NaiveDateTime) -> i64 {
        self.window_start
            .map(|start| whole_seconds_between(start, now))
            .unwrap_or(0)
    }

    pub fn live_secs(&self, now: NaiveDateTime) -> i64 {
        self.prior_secs + self.open_secs(now)
    }
}

/// Point-in-time view of the engine, safe to hand to any presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub task_id: Option<i64>,
    pub task_name: Option<String>,
    pub project: Option<String>,
    /// Persisted seconds plus the open tick window.
    pub elapsed_secs: i64,
    /// Seconds durably written as of the last checkpoint.
    pub persisted_secs: i64,
    pub checkpoint_interval_secs: i64,
}

impl SessionSnapshot {
    pub fn is_paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }

    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }
}
