use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub print_files: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        if let Some(ignored) = &cli.ignored {
            debug!("Ignoring second argument '{}'", ignored);
        }
        Self {
            root: cli.path,
            print_files: cli.print_files,
        }
    }
}
