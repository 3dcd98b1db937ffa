use clap::{Parser, Subcommand};

/// Command-line interface definition for tasklogger
#[derive(Parser)]
#[command(
    name = "tasklogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal task timer: start, stop and resume named tasks with crash-safe checkpoints in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, repair)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "repair",
            help = "Close every unfinished task except the newest one"
        )]
        repair: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a new task and track it in the foreground
    Start {
        /// Task name
        name: String,

        #[arg(long, short = 'p', help = "Project name (created if missing)")]
        project: Option<String>,

        #[arg(long, short = 'd', help = "Start and exit without tracking in the foreground")]
        detach: bool,
    },

    /// Resume the paused task
    Resume {
        #[arg(long, short = 'd', help = "Resume and exit without tracking in the foreground")]
        detach: bool,
    },

    /// Start again a task by name and project (picks up an unfinished one)
    Restart {
        /// Task name
        name: String,

        #[arg(long, short = 'p', help = "Project name")]
        project: Option<String>,

        #[arg(long, short = 'd', help = "Restart and exit without tracking in the foreground")]
        detach: bool,
    },

    /// Stop the current task and mark it completed
    Stop,

    /// Show the current task
    Status {
        #[arg(long, help = "Print the status as JSON")]
        json: bool,
    },

    /// List task history, newest first
    List {
        #[arg(long, short = 'n', conflicts_with = "all", help = "Number of tasks to show")]
        limit: Option<usize>,

        #[arg(long, help = "Show every task")]
        all: bool,

        #[arg(long, help = "Print the tasks as JSON")]
        json: bool,
    },

    /// Delete a completed task
    Del {
        /// Task id (see `list`)
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add {
        name: String,

        #[arg(long, help = "Display color (free text, e.g. #ff8800)")]
        color: Option<String>,
    },

    /// List projects by name
    List,

    /// Rename or recolor a project
    Edit {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a project (its tasks are kept without project)
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
