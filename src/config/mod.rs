use crate::core::OpenTaskPolicy;
use crate::core::engine::{DEFAULT_CHECKPOINT_INTERVAL_SECS, DEFAULT_HISTORY_SIZE, EngineOptions};
use crate::errors::{AppError, AppResult};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Seconds between duration checkpoints of a running task.
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval_secs: i64,
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    #[serde(default)]
    pub open_task_policy: OpenTaskPolicy,
    /// tracing filter used when TASKLOGGER_LOG is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_checkpoint_interval() -> i64 {
    DEFAULT_CHECKPOINT_INTERVAL_SECS
}
fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            checkpoint_interval_secs: default_checkpoint_interval(),
            history_size: default_history_size(),
            open_task_policy: OpenTaskPolicy::default(),
            log_filter: default_log_filter(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tasklogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tasklogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tasklogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tasklogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn engine_options(&self) -> AppResult<EngineOptions> {
        if self.checkpoint_interval_secs <= 0 {
            return Err(AppError::Config(format!(
                "checkpoint_interval_secs must be positive, got {}",
                self.checkpoint_interval_secs
            )));
        }

        Ok(EngineOptions {
            checkpoint_interval: TimeDelta::seconds(self.checkpoint_interval_secs),
            open_task_policy: self.open_task_policy,
            history_size: self.history_size,
        })
    }

    /// Write this configuration as YAML, replacing `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(io::Error::other)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("tasklogger.sqlite")
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            config.write_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
