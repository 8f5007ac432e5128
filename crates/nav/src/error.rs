use lucius_traits::DomError;
use thiserror::Error;

/// Errors raised while setting up or driving the scroll navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Required element #{id} is missing ({role})")]
    MissingElement { id: String, role: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Document access failed: {0}")]
    Dom(#[from] DomError),
}
