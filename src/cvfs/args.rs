use clap::{Parser, Subcommand, ValueEnum};
use cvfs::model::DocumentType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cvfs", version)]
#[command(about = "Comprehensive virtual file system: an in-memory disk shell", long_about = None)]
pub struct Cli {
    /// Directory holding config.json and saved disks
    #[arg(long, env = "CVFS_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Log verbosity, written to stderr
    #[arg(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// One REPL line. The first word selects the command.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Create a new disk and switch to it
    #[command(name = "newDisk")]
    NewDisk {
        /// Declared capacity (not enforced)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        capacity: u32,
    },

    /// Create a document: newDoc <path> <type> <content...>
    #[command(name = "newDoc")]
    NewDoc {
        path: String,
        #[arg(value_parser = parse_doc_type)]
        doc_type: DocumentType,
        /// Words are joined with single spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        content: Vec<String>,
    },

    /// Create a directory
    #[command(name = "newDir")]
    NewDir { path: String },

    /// Delete a document or a whole directory
    #[command(name = "delete")]
    Delete { path: String },

    /// Rename a document or directory
    #[command(name = "rename")]
    Rename { path: String, new_name: String },

    /// Move to a directory, or `..` for the parent
    #[command(name = "changeDir")]
    ChangeDir { path: String },

    /// List the current directory
    #[command(name = "list")]
    List,

    /// List the current directory recursively
    #[command(name = "rList")]
    RList,

    /// Define a criterion: newSimpleCri <name> <attr> <op> <value>
    #[command(name = "newSimpleCri")]
    NewSimpleCri {
        name: String,
        attr: String,
        #[arg(allow_hyphen_values = true)]
        op: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Define the negation of an existing criterion
    #[command(name = "newNegation")]
    NewNegation { name: String, target: String },

    /// Combine two criteria with && or ||
    #[command(name = "newBinaryCri")]
    NewBinaryCri {
        name: String,
        left: String,
        op: String,
        right: String,
    },

    /// Print every defined criterion
    #[command(name = "printAllCriteria")]
    PrintAllCriteria,

    /// List the current directory through a criterion
    #[command(name = "search")]
    Search { criterion: String },

    /// Recursive search through a criterion
    #[command(name = "rSearch")]
    RSearch { criterion: String },

    /// Save the current disk under a name
    #[command(name = "save")]
    Save { name: String },

    /// Load a saved disk
    #[command(name = "load")]
    Load { name: String },

    /// Undo the last change
    #[command(name = "undo")]
    Undo,

    /// Redo the last undone change
    #[command(name = "redo")]
    Redo,

    /// Leave the session
    #[command(name = "quit")]
    Quit,
}

fn parse_doc_type(s: &str) -> Result<DocumentType, String> {
    s.parse()
}
