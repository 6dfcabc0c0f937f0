#![allow(clippy::enum_variant_names)]

use std::io;

use clap::Parser as _;
use tracing::debug;
use tracing::level_filters::LevelFilter;

use crate::{
    application::{Application, ApplicationError},
    cli::Cli,
};

mod application;
mod cli;
mod ext;
mod filesystem;

#[snafu::report]
fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args)?;

    Ok(())
}

/// Diagnostics go to stderr; stdout carries only the tree.
fn setup_tracing(cli_args: &Cli) {
    let max_level = LevelFilter::from(cli_args.log_level);
    if max_level == LevelFilter::OFF {
        return;
    }

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
