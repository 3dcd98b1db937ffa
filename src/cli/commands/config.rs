use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::path::Path;
use std::process::Command;

fn platform_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Parse the file again and check the engine settings it carries.
fn validate(path: &Path) {
    match Config::load_from(path).and_then(|c| c.engine_options().map(|_| c)) {
        Ok(c) => success(format!(
            "Configuration is valid (checkpoint every {}s, history of {} tasks).",
            c.checkpoint_interval_secs, c.history_size
        )),
        Err(e) => error(format!("The edited configuration is not usable: {}", e)),
    }
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if !path.exists() {
                info("No configuration file yet; showing the defaults in effect.");
            }
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *edit_config {
            if !path.exists() {
                cfg.write_to(&path)?;
                info(format!("Created {} from the current settings.", path.display()));
            }

            let fallback = platform_editor();
            // --editor wins over the environment
            let first = editor.clone().unwrap_or_else(|| fallback.clone());

            let edited = if run_editor(&first, &path) {
                true
            } else if first != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    first, fallback
                ));
                run_editor(&fallback, &path)
            } else {
                false
            };

            if edited {
                validate(&path);
            } else {
                error(format!(
                    "Failed to edit {}; set $EDITOR or pass --editor.",
                    path.display()
                ));
            }
        }
    }

    Ok(())
}
