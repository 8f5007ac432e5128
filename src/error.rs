// src/error.rs
use lucius_site::SiteError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `lucius` command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Site generation failed: {0}")]
    Site(#[from] SiteError),

    #[error("Project root '{}' is not usable: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify_debouncer_mini::notify::Error),
}
