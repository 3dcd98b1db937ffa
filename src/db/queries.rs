use crate::db::projects::get_or_create_project;
use crate::errors::{AppError, AppResult};
use crate::models::{TaskKey, TaskRecord};
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const TASK_COLUMNS: &str = "SELECT t.id, t.name, p.name AS project_name, t.start_time,
        t.end_time, t.duration_seconds, t.is_completed
 FROM tasks t
 LEFT JOIN projects p ON t.project_id = p.id";

fn timestamp_column(raw: &str, idx: usize) -> Result<NaiveDateTime> {
    parse_timestamp(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn map_row(row: &Row) -> Result<TaskRecord> {
    let start_str: String = row.get("start_time")?;
    let end_str: Option<String> = row.get("end_time")?;

    let start = timestamp_column(&start_str, 3)?;
    let end = match end_str {
        Some(s) if !s.trim().is_empty() => Some(timestamp_column(&s, 4)?),
        _ => None,
    };

    Ok(TaskRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        project: row.get("project_name")?,
        start,
        end,
        duration_secs: row.get("duration_seconds")?,
        completed: row.get("is_completed")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<TaskRecord>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert an open task, creating its project on the fly.
/// Both writes share one transaction.
pub fn insert_task(
    conn: &mut Connection,
    name: &str,
    project: Option<&str>,
    start: NaiveDateTime,
) -> AppResult<i64> {
    let tx = conn.transaction()?;

    let project_id = match project {
        Some(p) => Some(get_or_create_project(&tx, p)?.id),
        None => None,
    };

    tx.execute(
        "INSERT INTO tasks (name, project_id, start_time, duration_seconds, is_completed)
         VALUES (?1, ?2, ?3, 0, 0)",
        params![name, project_id, format_timestamp(&start)],
    )?;
    let id = tx.last_insert_rowid();

    tx.commit()?;
    Ok(id)
}

pub fn complete_task(
    conn: &Connection,
    id: i64,
    end: NaiveDateTime,
    delta_secs: i64,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tasks
         SET end_time = ?1,
             duration_seconds = duration_seconds + ?2,
             is_completed = 1
         WHERE id = ?3",
        params![format_timestamp(&end), delta_secs, id],
    )?;

    if changed == 0 {
        return Err(AppError::TaskNotFound(id.to_string()));
    }
    Ok(())
}

pub fn add_task_duration(conn: &Connection, id: i64, delta_secs: i64) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tasks
         SET duration_seconds = duration_seconds + ?1
         WHERE id = ?2",
        params![delta_secs, id],
    )?;

    if changed == 0 {
        return Err(AppError::TaskNotFound(id.to_string()));
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, key: &TaskKey) -> AppResult<usize> {
    let deleted = conn.execute(
        "DELETE FROM tasks
         WHERE name = ?1 AND start_time = ?2 AND end_time = ?3",
        params![
            key.name,
            format_timestamp(&key.start),
            format_timestamp(&key.end)
        ],
    )?;
    Ok(deleted)
}

pub fn delete_completed_task(conn: &Connection, id: i64) -> AppResult<usize> {
    let deleted = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND is_completed = 1",
        [id],
    )?;
    Ok(deleted)
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<Option<TaskRecord>> {
    let sql = format!("{TASK_COLUMNS} WHERE t.id = ?1");
    let task = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(task)
}

/// Every not-completed task, newest first.
pub fn load_open_tasks(conn: &Connection) -> AppResult<Vec<TaskRecord>> {
    let sql = format!("{TASK_COLUMNS} WHERE t.is_completed = 0 ORDER BY t.start_time DESC, t.id DESC");
    collect(conn, &sql, [])
}

pub fn find_open_task_by_name_and_project(
    conn: &Connection,
    name: &str,
    project: Option<&str>,
) -> AppResult<Option<TaskRecord>> {
    let found = match project {
        None => {
            let sql = format!(
                "{TASK_COLUMNS}
                 WHERE t.is_completed = 0 AND t.name = ?1 AND t.project_id IS NULL
                 ORDER BY t.start_time DESC, t.id DESC
                 LIMIT 1"
            );
            collect(conn, &sql, [name])?
        }
        Some(p) => {
            let sql = format!(
                "{TASK_COLUMNS}
                 WHERE t.is_completed = 0 AND t.name = ?1 AND p.name = ?2
                 ORDER BY t.start_time DESC, t.id DESC
                 LIMIT 1"
            );
            collect(conn, &sql, [name, p])?
        }
    };
    Ok(found.into_iter().next())
}

pub fn load_all_tasks(conn: &Connection) -> AppResult<Vec<TaskRecord>> {
    let sql = format!("{TASK_COLUMNS} ORDER BY t.start_time DESC, t.id DESC");
    collect(conn, &sql, [])
}

pub fn load_recent_tasks(conn: &Connection, limit: usize) -> AppResult<Vec<TaskRecord>> {
    let sql = format!("{TASK_COLUMNS} ORDER BY t.start_time DESC, t.id DESC LIMIT ?1");
    collect(conn, &sql, [limit as i64])
}

/// Complete every open task except `keep_id`, without adding duration.
/// Used by `db --repair` to restore the single-open-task invariant.
pub fn close_open_tasks_except(
    conn: &mut Connection,
    keep_id: i64,
    end: NaiveDateTime,
) -> AppResult<usize> {
    let tx = conn.transaction()?;
    let closed = tx.execute(
        "UPDATE tasks
         SET end_time = ?1, is_completed = 1
         WHERE is_completed = 0 AND id <> ?2",
        params![format_timestamp(&end), keep_id],
    )?;
    tx.commit()?;
    Ok(closed)
}
