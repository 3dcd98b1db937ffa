use rusqlite::Connection;
use tasklogger::core::TaskStore;
use tasklogger::db::initialize::init_db;
use tasklogger::db::log::load_log;
use tasklogger::db::pool::DbPool;
use tasklogger::db::queries;
use tasklogger::utils::formatting::{format_duration, format_duration_compact, status_line};
use tasklogger::utils::time::{format_timestamp, parse_timestamp};

mod common;
use common::{memory_pool, t0};

fn legacy_schema(conn: &Connection) {
    conn.execute_batch(
        r#"
        CREATE TABLE projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            color       TEXT,
            created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE completed_tasks (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            name              TEXT NOT NULL,
            project_id        INTEGER,
            start_time        TEXT NOT NULL,
            end_time          TEXT,
            duration_seconds  INTEGER NOT NULL DEFAULT 0,
            is_completed      BOOLEAN NOT NULL DEFAULT 0,
            created_at        TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        INSERT INTO projects (name) VALUES ('Legacy');
        INSERT INTO completed_tasks (name, project_id, start_time, end_time, duration_seconds, is_completed)
        VALUES ('old work', 1, '2024-11-02T10:00:00.250113', '2024-11-02T11:00:00.901', 3600, 1);
        "#,
    )
    .unwrap();
}

#[test]
fn test_legacy_completed_tasks_are_migrated_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite");
    let path = path.to_string_lossy().to_string();

    {
        let conn = Connection::open(&path).unwrap();
        legacy_schema(&conn);
    }

    let mut pool = DbPool::new(&path).unwrap();
    init_db(&pool.conn).unwrap();
    init_db(&pool.conn).unwrap();

    let tasks = pool.get_all_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].matches("old work", Some("Legacy")));
    assert_eq!(tasks[0].duration_secs, 3600);
    assert_eq!(format_timestamp(&tasks[0].start), "2024-11-02T10:00:00");

    let markers = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .filter(|e| e.operation == "migration_applied")
        .count();
    assert_eq!(markers, 1);
}

#[test]
fn test_open_tasks_newest_first() {
    let mut pool = memory_pool();
    let a = pool.create_task("a", None, t0()).unwrap();
    let b = pool.create_task("b", Some("p"), t0()).unwrap();

    let open: Vec<i64> = pool.find_open_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(open, vec![b, a]);

    let found = pool
        .find_open_task_by_name_and_project("b", Some("p"))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, b);
    assert!(
        pool.find_open_task_by_name_and_project("b", None)
            .unwrap()
            .is_none()
    );
    assert_eq!(pool.find_open_task().unwrap().map(|t| t.id), Some(b));
}

#[test]
fn test_duration_writes_are_additive() {
    let mut pool = memory_pool();
    let id = pool.create_task("a", None, t0()).unwrap();

    pool.add_task_duration(id, 10).unwrap();
    pool.add_task_duration(id, 10).unwrap();
    pool.complete_task(id, t0() + chrono::TimeDelta::seconds(25), 5)
        .unwrap();

    let task = queries::load_task(&pool.conn, id).unwrap().unwrap();
    assert_eq!(task.duration_secs, 25);
    assert!(task.completed);

    assert!(pool.add_task_duration(9999, 1).is_err());
}

#[test]
fn test_timestamps_and_durations_format() {
    assert_eq!(format_timestamp(&t0()), "2025-03-01T09:00:00");
    assert_eq!(parse_timestamp("2025-03-01T09:00:00").unwrap(), t0());
    assert!(parse_timestamp("01/03/2025 09:00").is_err());

    assert_eq!(format_duration(3725), "01:02:05");
    assert_eq!(format_duration(90_000), "25:00:00");
    assert_eq!(format_duration_compact(3725, true), "1:02");
    assert_eq!(format_duration_compact(3725, false), "1 02");
    assert_eq!(status_line(Some("a"), 65), "a - 00:01:05");
    assert_eq!(status_line(None, 0), "Task Logger");
}

#[test]
fn test_delete_completed_task_leaves_open_rows() {
    let mut pool = memory_pool();
    let open = pool.create_task("a", None, t0()).unwrap();
    let done = pool.create_task("a", None, t0()).unwrap();
    pool.complete_task(done, t0(), 0).unwrap();

    assert_eq!(pool.delete_completed_task(open).unwrap(), 0);
    assert_eq!(pool.delete_completed_task(done).unwrap(), 1);
    assert_eq!(pool.delete_completed_task(done).unwrap(), 0);

    let left: Vec<i64> = pool.get_all_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(left, vec![open]);
}
