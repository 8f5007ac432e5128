//! Error handling for WASM bindings.
//!
//! Converts navigation errors into JavaScript `Error` objects carrying a
//! `code` property.

use lucius_nav::NavError;
use lucius_traits::DomError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required element (content, menu, toggle button) is missing
    MissingElement,
    /// Invalid configuration object
    Config,
    /// Document access failed (bad selector, class list failure)
    Dom,
    /// Event listener registration failed
    Listener,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingElement => "MISSING_ELEMENT",
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Dom => "DOM_ERROR",
            ErrorCode::Listener => "LISTENER_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct NavJsError {
    code: ErrorCode,
    message: String,
}

impl NavJsError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    pub fn listener(event: &str, err: &JsValue) -> Self {
        Self::new(
            ErrorCode::Listener,
            format!("Failed to listen for '{event}': {err:?}"),
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<NavError> for NavJsError {
    fn from(err: NavError) -> Self {
        let code = match &err {
            NavError::MissingElement { .. } => ErrorCode::MissingElement,
            NavError::Config(_) => ErrorCode::Config,
            NavError::Dom(_) => ErrorCode::Dom,
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomError> for NavJsError {
    fn from(err: DomError) -> Self {
        Self::new(ErrorCode::Dom, err.to_string())
    }
}

impl From<NavJsError> for JsValue {
    fn from(err: NavJsError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_str()),
        )
        .ok();
        js_error.into()
    }
}
