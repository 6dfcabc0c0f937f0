use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Print a directory as an ASCII tree
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The root directory to list
    pub path: PathBuf,

    /// Include regular files, with their sizes
    #[clap(short = 'f', long = "files")]
    pub print_files: bool,

    /// A second argument other than `-f` is accepted and has no effect
    #[clap(hide = true, allow_hyphen_values = true)]
    pub ignored: Option<String>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
