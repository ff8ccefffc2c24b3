//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Tracks filed pull requests and tweets their outcome
#[derive(Debug, Clone, Parser)]
#[command(name = "hug-status", version = concat!("v", env!("CARGO_PKG_VERSION")))]
pub struct Cli {
    /// Configuration file (TOML, or JSON when the name ends in .json)
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    /// Write the process id to this file
    #[arg(long, value_name = "PATH")]
    pub pidfile: Option<PathBuf>,
}
