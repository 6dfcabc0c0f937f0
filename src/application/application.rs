use std::io;
use std::path::PathBuf;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::filesystem::{DirTreeError, dir_tree};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let mut out = io::stdout().lock();
        dir_tree(&mut out, &app_config.root, app_config.print_files).context(ListingSnafu {
            root: app_config.root.clone(),
        })?;

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to list the directory tree of {}", root.display()))]
    ListingError { root: PathBuf, source: DirTreeError },
}
