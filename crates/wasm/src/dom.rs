//! `DomAccess` backed by the browser document.

use lucius_traits::{DomAccess, DomError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement};

/// The live browser document.
#[derive(Debug, Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Use the document of the global `window`.
    pub fn from_window() -> Result<Self, DomError> {
        let window =
            web_sys::window().ok_or_else(|| DomError::NoDocument("no window object".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::NoDocument("window has no document".into()))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl DomAccess for BrowserDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
        let nodes = root
            .query_selector_all(selector)
            .map_err(|e| DomError::InvalidSelector {
                selector: selector.to_string(),
                message: format!("{e:?}"),
            })?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn id_of(&self, element: &Element) -> String {
        element.id()
    }

    fn offset_top(&self, element: &Element) -> i32 {
        element
            .dyn_ref::<HtmlElement>()
            .map(HtmlElement::offset_top)
            .unwrap_or(0)
    }

    fn link_hash(&self, element: &Element) -> String {
        element
            .dyn_ref::<HtmlAnchorElement>()
            .map(HtmlAnchorElement::hash)
            .unwrap_or_default()
    }

    fn scroll_top(&self) -> i32 {
        // Quirks-mode documents scroll the body instead of the root element.
        self.document
            .document_element()
            .map(|root| root.scroll_top())
            .filter(|top| *top != 0)
            .or_else(|| self.document.body().map(|body| body.scroll_top()))
            .unwrap_or(0)
    }

    fn set_class(&self, element: &Element, class: &str, present: bool) -> Result<(), DomError> {
        let classes = element.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        result.map_err(|e| DomError::ClassList {
            element: describe(element),
            message: format!("{e:?}"),
        })
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }
}

fn describe(element: &Element) -> String {
    let id = element.id();
    if id.is_empty() {
        element.tag_name().to_ascii_lowercase()
    } else {
        format!("#{id}")
    }
}
