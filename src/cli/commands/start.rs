use crate::cli::commands::{close_engine, open_engine, project_suffix};
use crate::cli::parser::Commands;
use crate::cli::tracking::track_foreground;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start {
        name,
        project,
        detach,
    } = cmd
    {
        let mut engine = open_engine(cfg)?;

        let snap = match engine.start(name, project.as_deref()) {
            Ok(s) => s,
            Err(e @ AppError::InvalidState { .. }) => {
                warning("A task is already open: use `resume`, `stop` or `restart`.");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let label = format!(
            "{}{}",
            snap.task_name.as_deref().unwrap_or_default(),
            project_suffix(snap.project.as_deref())
        );
        success(format!("Started '{}'", label));
        ttlog_quiet(
            &engine.store().conn,
            "start",
            &label,
            &format!("Task #{} started", snap.task_id.unwrap_or_default()),
        );

        if !*detach {
            track_foreground(&mut engine)?;
        }

        close_engine(engine)?;
    }

    Ok(())
}
