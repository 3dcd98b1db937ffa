use crate::cli::commands::{close_engine, open_engine};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::TaskRecord;
use crate::utils::colors::{GREEN, RESET};
use crate::utils::formatting::format_duration;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit, all, json } = cmd {
        let mut engine = open_engine(cfg)?;

        let tasks: Vec<TaskRecord> = if *all {
            engine.all_tasks()?
        } else if let Some(n) = limit {
            engine.recent_tasks(*n)?
        } else {
            engine.history().to_vec()
        };

        if *json {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        } else if tasks.is_empty() {
            println!("No tasks recorded yet.");
        } else {
            print!("{}", render_tasks(&tasks));
        }

        close_engine(engine)?;
    }

    Ok(())
}

fn render_tasks(tasks: &[TaskRecord]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Task", 28),
        Column::new("Project", 16),
        Column::new("Start", 19),
        Column::new("End", 19),
        Column::new("Duration", 9),
    ]);

    for t in tasks {
        table.add_row(vec![
            t.id.to_string(),
            t.name.clone(),
            t.project.clone().unwrap_or_else(|| "--".to_string()),
            t.start_str(),
            t.end_str().unwrap_or_else(|| "open".to_string()),
            format_duration(t.duration_secs),
        ]);
    }

    // colour after layout so escape codes don't skew the widths
    let rendered = table.render();
    let mut lines = rendered.lines();
    let mut out = format!("{}\n", lines.next().unwrap_or_default());
    for (line, t) in lines.zip(tasks) {
        if t.is_open() {
            out.push_str(&format!("{GREEN}{line}{RESET}\n"));
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
