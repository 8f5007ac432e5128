//! DomAccess trait for abstracting the host document.
//!
//! The navigation logic reads element geometry and mutates class lists only
//! through this trait, so it can run against a real browser document or an
//! in-memory fake.

use std::fmt::Debug;
use thiserror::Error;

/// Error type for document access operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Element not found: #{0}")]
    NotFound(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Class list update failed on '{element}': {message}")]
    ClassList { element: String, message: String },

    #[error("No document available: {0}")]
    NoDocument(String),
}

/// Read and class-mutation access to a document.
///
/// Implementations are single-threaded: browser element handles cannot cross
/// threads, so neither `Send` nor `Sync` is required.
///
/// # Implementations
///
/// - `BrowserDom` (lucius-wasm): backed by `web_sys::Document`
/// - [`InMemoryDom`](crate::InMemoryDom): a fixed element tree for tests
pub trait DomAccess {
    /// Handle to an element. Cloning must be cheap.
    type Element: Clone + Debug;

    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Return all descendants of `root` matching `selector`, in document order.
    fn query_all(
        &self,
        root: &Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>, DomError>;

    /// The element's `id` attribute (empty when absent).
    fn id_of(&self, element: &Self::Element) -> String;

    /// Vertical offset of the element relative to the document, in pixels.
    fn offset_top(&self, element: &Self::Element) -> i32;

    /// Fragment of a link's target including the leading `#`, or an empty
    /// string when the target has no fragment.
    fn link_hash(&self, element: &Self::Element) -> String;

    /// Current vertical scroll position of the viewport top.
    fn scroll_top(&self) -> i32;

    /// Add or remove a class on an element.
    fn set_class(
        &self,
        element: &Self::Element,
        class: &str,
        present: bool,
    ) -> Result<(), DomError>;

    /// Whether the element currently carries `class`.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
}
