use crate::cli::commands::{Engine, ask_confirmation, close_engine, open_engine};
use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { action } = cmd {
        let mut engine = open_engine(cfg)?;
        run(&mut engine, action)?;
        close_engine(engine)?;
    }

    Ok(())
}

fn run(engine: &mut Engine, action: &ProjectAction) -> AppResult<()> {
    match action {
        ProjectAction::Add { name, color } => {
            let project = engine.create_project(name, color.as_deref())?;
            success(format!("Project '{}' created (#{}).", project.name, project.id));
            ttlog_quiet(
                &engine.store().conn,
                "project_add",
                &project.name,
                "Project created",
            );
        }

        ProjectAction::List => {
            let projects = engine.list_projects()?;
            if projects.is_empty() {
                println!("No projects yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 5),
                Column::new("Name", 28),
                Column::new("Color", 12),
            ]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.color_label().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ProjectAction::Edit { id, name, color } => {
            let project = engine.update_project(*id, name, color.as_deref())?;
            success(format!("Project #{} is now '{}'.", project.id, project.name));
            ttlog_quiet(
                &engine.store().conn,
                "project_edit",
                &project.name,
                &format!("Project #{} updated", project.id),
            );
        }

        ProjectAction::Del { id, yes } => {
            let prompt = format!(
                "Delete project #{}? Its tasks are kept without a project.",
                id
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let project = engine.delete_project(*id)?;
            success(format!("Project '{}' has been deleted.", project.name));
            ttlog_quiet(
                &engine.store().conn,
                "project_del",
                &project.name,
                &format!("Project #{} deleted", project.id),
            );
        }
    }

    Ok(())
}
