use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while generating the site.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template '{name}' is invalid: {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Rendering '{name}' failed: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SiteError {
    /// Attach `path` to an I/O error, for use with `map_err`.
    pub(crate) fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> SiteError {
        let path = path.as_ref().to_path_buf();
        move |source| SiteError::Io { path, source }
    }

    pub(crate) fn json(path: impl AsRef<Path>) -> impl FnOnce(serde_json::Error) -> SiteError {
        let path = path.as_ref().to_path_buf();
        move |source| SiteError::Json { path, source }
    }
}
