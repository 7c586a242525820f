//! CLI parse: clap types for both binaries. No behavior; definitions only.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Logging and config flags shared by both tools
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file path (replaces the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Show your local branches together with the status of their tracker issue
#[derive(Parser, Debug)]
#[command(name = "brstatus")]
#[command(about = "List git branches with the status of their MDL tracker issue")]
pub struct BrstatusCli {
    /// Directory of the Moodle checkout (default: $MOODLE_DIR, then the current directory)
    #[arg(short = 'd', long = "dir", value_name = "REPODIR")]
    pub repo_dir: Option<PathBuf>,

    /// Comma separated column names, or ALL. Valid names: branch, mdl, title,
    /// type, typeId, priority, priorityId, status, statusId, resolution,
    /// resolutionId, created, updated, resolved, assignee, reporter
    #[arg(short = 'c', long = "columns", value_name = "COLS")]
    pub columns: Option<String>,

    /// Maximum column width; 0 disables truncation (default: 45)
    #[arg(short = 'm', long = "max-width", value_name = "N")]
    pub max_width: Option<usize>,

    /// strftime pattern for the created, updated and resolved columns (default: %Y-%m-%d)
    #[arg(short = 't', long = "date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Base URL of the issue tracker
    #[arg(long, value_name = "URL")]
    pub tracker_url: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Compare files in moodledata with a database export
#[derive(Parser, Debug)]
#[command(name = "moodledata-compare")]
#[command(about = "Compare the files in moodledata with a database export")]
pub struct CompareCli {
    /// File with the database export (hash;path;name;size per line)
    #[arg(short = 'd', long = "dbfile", value_name = "FILE")]
    pub db_file: Option<PathBuf>,

    /// File with the directory listing (bucket1/bucket2/hash per line)
    #[arg(short = 'f', long = "dirfile", value_name = "FILE")]
    pub dir_file: Option<PathBuf>,

    /// Do not show file names in the output
    #[arg(short = 'n', long = "noname")]
    pub no_name: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    #[command(flatten)]
    pub common: CommonArgs,
}
