//! Project rows. Names are unique; deleting a project orphans its tasks
//! through the `ON DELETE SET NULL` foreign key.

use crate::errors::{AppError, AppResult};
use crate::models::Project;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}

/// Turn a UNIQUE violation on `projects.name` into a readable error.
fn unique_name(err: rusqlite::Error, name: &str) -> AppError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            AppError::DuplicateProject(name.to_string())
        }
        _ => AppError::Db(err),
    }
}

pub fn insert_project(conn: &Connection, name: &str, color: Option<&str>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (name, color) VALUES (?1, ?2)",
        params![name, color],
    )
    .map_err(|e| unique_name(e, name))?;
    Ok(conn.last_insert_rowid())
}

pub fn load_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, color
         FROM projects
         ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT id, name, color FROM projects WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(project)
}

pub fn load_project_by_name(conn: &Connection, name: &str) -> AppResult<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT id, name, color FROM projects WHERE name = ?1",
            [name],
            map_row,
        )
        .optional()?;
    Ok(project)
}

pub fn get_or_create_project(conn: &Connection, name: &str) -> AppResult<Project> {
    if let Some(p) = load_project_by_name(conn, name)? {
        return Ok(p);
    }

    let id = insert_project(conn, name, None)?;
    Ok(Project {
        id,
        name: name.to_string(),
        color: None,
    })
}

pub fn update_project(
    conn: &Connection,
    id: i64,
    name: &str,
    color: Option<&str>,
) -> AppResult<()> {
    let changed = conn
        .execute(
            "UPDATE projects SET name = ?1, color = ?2 WHERE id = ?3",
            params![name, color, id],
        )
        .map_err(|e| unique_name(e, name))?;

    if changed == 0 {
        return Err(AppError::ProjectNotFound(id.to_string()));
    }
    Ok(())
}

pub fn delete_project(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::ProjectNotFound(id.to_string()));
    }
    Ok(())
}
