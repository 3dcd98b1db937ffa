use crate::cli::commands::{close_engine, open_engine, project_suffix};
use crate::cli::parser::Commands;
use crate::cli::tracking::track_foreground;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resume { detach } = cmd {
        let mut engine = open_engine(cfg)?;
        let snap = engine.resume()?;

        let label = format!(
            "{}{}",
            snap.task_name.as_deref().unwrap_or_default(),
            project_suffix(snap.project.as_deref())
        );
        success(format!(
            "Resumed '{}' at {}",
            label,
            format_duration(snap.elapsed_secs)
        ));
        ttlog_quiet(
            &engine.store().conn,
            "resume",
            &label,
            &format!("Resumed with {}s logged", snap.persisted_secs),
        );

        if !*detach {
            track_foreground(&mut engine)?;
        }

        close_engine(engine)?;
    }

    Ok(())
}
