use crate::cli::commands::{close_engine, open_engine, project_suffix};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::SessionStatus;
use crate::errors::AppResult;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::{bold, format_duration, status_line};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let engine = open_engine(cfg)?;
        let snap = engine.snapshot();

        if *json {
            println!("{}", serde_json::to_string_pretty(&snap)?);
        } else {
            match snap.status {
                SessionStatus::Idle => {
                    println!("{}{}{}", GREY, status_line(None, 0), RESET);
                    println!("No active task.");
                }
                SessionStatus::Running => {
                    println!(
                        "{}▶ Running:{} {}{}",
                        GREEN,
                        RESET,
                        bold(snap.task_name.as_deref().unwrap_or_default()),
                        project_suffix(snap.project.as_deref())
                    );
                    println!("  elapsed: {}", format_duration(snap.elapsed_secs));
                }
                SessionStatus::Paused => {
                    println!(
                        "{}⏸ Paused:{} {}{}",
                        YELLOW,
                        RESET,
                        bold(snap.task_name.as_deref().unwrap_or_default()),
                        project_suffix(snap.project.as_deref())
                    );
                    println!("  logged:  {}", format_duration(snap.persisted_secs));
                    println!("  `tasklogger resume` continues it, `tasklogger stop` completes it.");
                }
            }
        }

        close_engine(engine)?;
    }

    Ok(())
}
