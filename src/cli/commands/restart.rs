use crate::cli::commands::{close_engine, open_engine, project_suffix};
use crate::cli::parser::Commands;
use crate::cli::tracking::track_foreground;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restart {
        name,
        project,
        detach,
    } = cmd
    {
        let mut engine = open_engine(cfg)?;

        let before = engine.snapshot();
        let snap = engine.restart(name, project.as_deref())?;

        if let (Some(prev_id), Some(prev_name)) = (before.task_id, &before.task_name)
            && snap.task_id != Some(prev_id)
        {
            info(format!("Stopped '{}' first.", prev_name));
        }

        let label = format!(
            "{}{}",
            snap.task_name.as_deref().unwrap_or_default(),
            project_suffix(snap.project.as_deref())
        );
        success(format!(
            "Running '{}' (#{}) at {}",
            label,
            snap.task_id.unwrap_or_default(),
            format_duration(snap.elapsed_secs)
        ));
        ttlog_quiet(
            &engine.store().conn,
            "restart",
            &label,
            &format!("Task #{} running", snap.task_id.unwrap_or_default()),
        );

        if !*detach {
            track_foreground(&mut engine)?;
        }

        close_engine(engine)?;
    }

    Ok(())
}
