use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

const LEGACY_TASKS_MIGRATION: &str = "20250301_0001_completed_tasks_to_tasks";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name = ?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_projects_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            color       TEXT,
            created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;
    Ok(())
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            name              TEXT NOT NULL,
            project_id        INTEGER,
            start_time        TEXT NOT NULL,
            end_time          TEXT,
            duration_seconds  INTEGER NOT NULL DEFAULT 0,
            is_completed      BOOLEAN NOT NULL DEFAULT 0,
            created_at        TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_start_time ON tasks(start_time);
        CREATE INDEX IF NOT EXISTS idx_tasks_open ON tasks(is_completed);
        "#,
    )?;
    Ok(())
}

/// Move rows of the desktop tracker's `completed_tasks` table into `tasks`.
/// Runs once; the marker row in `log` prevents a second pass.
fn migrate_legacy_completed_tasks(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "completed_tasks")? {
        return Ok(());
    }

    if migration_applied(conn, LEGACY_TASKS_MIGRATION)? {
        debug!("legacy completed_tasks already migrated");
        return Ok(());
    }

    warning("Legacy 'completed_tasks' table found, copying rows into 'tasks'...");

    conn.execute_batch(
        r#"
        BEGIN;

        INSERT INTO tasks (id, name, project_id, start_time, end_time,
                           duration_seconds, is_completed, created_at)
        SELECT id, name, project_id, start_time, end_time,
               duration_seconds, is_completed, created_at
        FROM completed_tasks;

        DROP TABLE completed_tasks;

        COMMIT;
        "#,
    )?;

    let moved: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;

    mark_migration(
        conn,
        LEGACY_TASKS_MIGRATION,
        "Copied completed_tasks into tasks",
    )?;

    success(format!(
        "Migration applied: {} → {} task rows now in 'tasks'",
        LEGACY_TASKS_MIGRATION, moved
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and by every engine construction.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table (migration markers live there)
    ensure_log_table(conn)?;

    // 2) Core tables
    create_projects_table(conn)?;
    create_tasks_table(conn)?;

    // 3) Desktop tracker layout
    migrate_legacy_completed_tasks(conn)?;

    Ok(())
}
