//! Startup reconciliation against unfinished task rows.

use crate::core::store::TaskStore;
use crate::errors::{AppError, AppResult};
use crate::models::TaskRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do when storage holds more than one unfinished task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenTaskPolicy {
    /// Refuse to load; the store must be repaired first.
    #[default]
    Strict,
    /// Load the newest unfinished task and leave the others alone.
    MostRecent,
}

/// The unfinished task a new session should be bound to, if any.
pub fn find_session_task<S: TaskStore>(
    store: &mut S,
    policy: OpenTaskPolicy,
) -> AppResult<Option<TaskRecord>> {
    let mut open = store.find_open_tasks()?;

    if open.len() > 1 {
        let ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        match policy {
            OpenTaskPolicy::Strict => return Err(AppError::MultipleOpenTasks(ids)),
            OpenTaskPolicy::MostRecent => {
                warn!(?ids, "several unfinished tasks in storage, loading the newest");
            }
        }
    }

    // newest first
    Ok(if open.is_empty() {
        None
    } else {
        Some(open.swap_remove(0))
    })
}

/// Close every unfinished task but the newest, with end = `now` and no
/// added duration. Returns the number of rows closed.
pub fn repair_open_tasks<S: TaskStore>(store: &mut S, now: NaiveDateTime) -> AppResult<usize> {
    let open = store.find_open_tasks()?;
    match open.first() {
        Some(newest) if open.len() > 1 => {
            let closed = store.close_open_tasks_except(newest.id, now)?;
            warn!(kept = newest.id, closed, "closed stale unfinished tasks");
            Ok(closed)
        }
        _ => Ok(0),
    }
}
