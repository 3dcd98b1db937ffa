pub mod config;
pub mod db;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod project;
pub mod restart;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;

use crate::config::Config;
use crate::core::{SessionEngine, SessionStatus};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::format_duration;
use std::io::{self, Write};

pub type Engine = SessionEngine<DbPool>;

/// Open the configured database, bring the schema up to date and build the
/// engine (which reconciles with any unfinished task).
pub fn open_engine(cfg: &Config) -> AppResult<Engine> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    SessionEngine::open(pool, cfg.engine_options()?)
}

/// Shut the engine down, flushing a running task one last time.
pub fn close_engine(engine: Engine) -> AppResult<()> {
    let snap = engine.snapshot();
    if snap.status == SessionStatus::Running
        && let Some(name) = &snap.task_name
    {
        info(format!(
            "'{}' left open at {}; run `tasklogger resume` to continue or `tasklogger stop` to finish it.",
            name,
            format_duration(snap.elapsed_secs)
        ));
    }
    engine.shutdown()?;
    Ok(())
}

/// Ask a yes/no confirmation from the user
pub fn ask_confirmation(prompt: &str) -> bool {
    crate::ui::messages::warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn project_suffix(project: Option<&str>) -> String {
    match project {
        Some(p) => format!(" [{}]", p),
        None => String::new(),
    }
}
