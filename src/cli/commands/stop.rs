use crate::cli::commands::{close_engine, open_engine, project_suffix};
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_duration;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut engine = open_engine(cfg)?;
    let record = engine.stop()?;

    let label = format!("{}{}", record.name, project_suffix(record.project.as_deref()));
    success(format!(
        "Stopped '{}' after {}",
        label,
        format_duration(record.duration_secs)
    ));
    ttlog_quiet(
        &engine.store().conn,
        "stop",
        &label,
        &format!(
            "Task #{} completed with {}s",
            record.id, record.duration_secs
        ),
    );

    close_engine(engine)
}
