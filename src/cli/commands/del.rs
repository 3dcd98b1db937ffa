use crate::cli::commands::{ask_confirmation, close_engine, open_engine, project_suffix};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut engine = open_engine(cfg)?;
        let task = engine.task(*id)?;

        let prompt = format!(
            "Delete task #{} '{}'{} ({} logged, started {})? This action is irreversible.",
            task.id,
            task.name,
            project_suffix(task.project.as_deref()),
            format_duration(task.duration_secs),
            task.start_str()
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return close_engine(engine);
        }

        let deleted = engine.delete_task_by_id(*id)?;
        success(format!("Task #{} '{}' has been deleted.", deleted.id, deleted.name));
        ttlog_quiet(
            &engine.store().conn,
            "del",
            &deleted.name,
            &format!("Deleted task #{} started {}", deleted.id, deleted.start_str()),
        );

        close_engine(engine)?;
    }

    Ok(())
}
