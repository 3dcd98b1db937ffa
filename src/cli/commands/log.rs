use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour per logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" | "resume" | "restart" => Colour::Green,
        "stop" => Colour::Cyan,
        "del" | "project_del" => Colour::Red,
        "project_add" | "project_edit" => Colour::Yellow,
        "migration_applied" | "repair" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(e.date);

            let op_target = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };

            println!(
                "{:>4}  {}  {}  {}",
                e.id,
                date,
                color_for_operation(&e.operation).paint(op_target),
                e.message
            );
        }
    }

    Ok(())
}
