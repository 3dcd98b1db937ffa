#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tasklogger::core::{EngineOptions, ManualClock, SessionEngine};
use tasklogger::db::initialize::init_db;
use tasklogger::db::pool::DbPool;

pub type TestEngine = SessionEngine<DbPool, ManualClock>;

pub fn tl() -> Command {
    let mut cmd = cargo_bin_cmd!("tasklogger");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasklogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema through the CLI, the way a user would.
pub fn init_cli_db(db_path: &str) {
    tl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// 2025-03-01 09:00:00, the instant every engine test starts from.
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn open_pool(path: &Path) -> DbPool {
    let pool = DbPool::new(&path.to_string_lossy()).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn engine_at(pool: DbPool, clock: &ManualClock) -> TestEngine {
    SessionEngine::with_clock(pool, clock.clone(), EngineOptions::default())
        .ok()
        .expect("engine")
}

pub fn engine_with(pool: DbPool, clock: &ManualClock, options: EngineOptions) -> TestEngine {
    SessionEngine::with_clock(pool, clock.clone(), options)
        .ok()
        .expect("engine")
}
