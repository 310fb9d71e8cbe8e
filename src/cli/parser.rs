use clap::{Parser, Subcommand};

/// Command-line interface definition for zlog
#[derive(Parser)]
#[command(
    name = "zlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A timestamped journal: every entry is appended to a CSV file, with crash-safe fallback storage",
    long_about = None
)]
pub struct Cli {
    /// Override the data file path (useful for tests or a second journal)
    #[arg(global = true, long = "file")]
    pub file: Option<String>,

    /// Run in test mode (no config file update, no log file)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the data file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Append an entry (no text records a bare timestamp)
    Add {
        /// Entry text; several words are joined with spaces
        text: Vec<String>,

        /// Extra column as key=value (repeatable)
        #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Flag the entry as a task
        #[arg(long = "task", short = 't')]
        task: bool,
    },

    /// Append an open checkbox item: "- [ ] text"
    Todo {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Append a completed checkbox item: "- [x] text"
    Done {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Toggle a checkbox by position, or the latest one matching a pattern
    Toggle {
        #[arg(value_name = "POSITION|PATTERN", required = true)]
        target: Vec<String>,
    },

    /// List the most recent entries
    List {
        #[arg(long, short = 'n', help = "Number of entries to show")]
        limit: Option<usize>,

        #[arg(long, short = 'a', conflicts_with = "limit", help = "Show all entries")]
        all: bool,

        #[arg(long = "tasks", help = "Show only pending tasks")]
        tasks: bool,

        #[arg(
            long = "completed",
            conflicts_with = "tasks",
            help = "Show only completed tasks"
        )]
        completed: bool,

        #[arg(long = "checkboxes", help = "Show only checkbox items and a summary")]
        checkboxes: bool,

        #[arg(long = "json", help = "Print entries as JSON")]
        json: bool,
    },

    /// Case-insensitive search in entry text
    Search {
        #[arg(required = true)]
        query: Vec<String>,

        #[arg(long = "json", help = "Print matches as JSON")]
        json: bool,
    },

    /// Replace the text of the entry at POSITION
    Edit {
        position: usize,

        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Delete the entry at POSITION
    Del {
        position: usize,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Mark the task at POSITION as completed
    Complete { position: usize },

    /// Write tasks to a separate CSV file
    Extract {
        #[arg(long = "dest", value_name = "FILE")]
        dest: String,

        #[arg(long, help = "Only tasks not yet completed")]
        pending: bool,

        #[arg(long, conflicts_with = "pending", help = "Only completed tasks")]
        completed: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import "<timestamp> ~ <text>" lines from a text file
    Import {
        #[arg(value_name = "FILE")]
        source: String,

        #[arg(long, help = "Merge into the data file ordered by timestamp")]
        sort: bool,
    },

    /// Export the journal as plain text, breaking lines on pauses
    Export {
        #[arg(long = "dest", value_name = "FILE")]
        dest: String,

        #[arg(
            long = "gap",
            value_name = "SECONDS",
            help = "Pause that starts a new line (overrides the config)"
        )]
        gap: Option<u64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Merge entries saved in temporary storage back into the data file
    Recover,

    /// Remove entries without text (heartbeat markers)
    Clean {
        #[arg(long = "backup", help = "Copy the data file to <file>.backup first")]
        backup: bool,

        #[arg(long = "dry-run", help = "Only count blank entries")]
        dry_run: bool,
    },

    /// Create a backup copy of the data file
    Backup {
        /// Destination file (".zip" is used when compressing)
        #[arg(long = "dest", value_name = "FILE")]
        dest: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Read entries line by line from standard input until EOF or /exit
    Session {
        #[arg(
            long = "heartbeat",
            value_name = "SECONDS",
            help = "Write an empty entry every SECONDS (overrides the config)"
        )]
        heartbeat: Option<u64>,

        #[arg(long = "no-heartbeat", conflicts_with = "heartbeat")]
        no_heartbeat: bool,
    },
}
