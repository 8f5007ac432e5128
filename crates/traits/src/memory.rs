//! An in-memory document for exercising `DomAccess` consumers without a browser.

use crate::dom::{DomAccess, DomError};
use std::cell::{Cell, RefCell};

/// Handle to an element of an [`InMemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Description of an element to append to an [`InMemoryDom`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    offset_top: i32,
    href: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn offset_top(mut self, offset: i32) -> Self {
        self.offset_top = offset;
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

#[derive(Debug)]
struct Node {
    spec: ElementSpec,
    parent: Option<NodeId>,
}

/// A fixed element tree with mutable class lists and scroll position.
///
/// Elements are stored in insertion order, which doubles as document order as
/// long as children are appended after their parents.
///
/// # Example
///
/// ```
/// use lucius_traits::{DomAccess, ElementSpec, InMemoryDom};
///
/// let dom = InMemoryDom::new();
/// let content = dom.append(None, ElementSpec::new("main").id("content"));
/// dom.append(Some(content), ElementSpec::new("section").id("intro").class("page"));
///
/// let pages = dom.query_all(&content, ".page").unwrap();
/// assert_eq!(pages.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDom {
    nodes: RefCell<Vec<Node>>,
    scroll_top: Cell<i32>,
}

impl InMemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level) and return its handle.
    pub fn append(&self, parent: Option<NodeId>, spec: ElementSpec) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node { spec, parent });
        id
    }

    /// Set the viewport scroll position reported by [`DomAccess::scroll_top`].
    pub fn set_scroll_top(&self, position: i32) {
        self.scroll_top.set(position);
    }

    /// All elements currently carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.spec.classes.iter().any(|c| c == class))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node.0).and_then(|n| n.parent)
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }

    fn matches(&self, node: NodeId, chain: &[Compound]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        let matched = self
            .nodes
            .borrow()
            .get(node.0)
            .is_some_and(|n| last.matches(&n.spec));
        if !matched {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        let mut current = self.parent_of(node);
        while let Some(ancestor) = current {
            if self.matches(ancestor, rest) {
                return true;
            }
            current = self.parent_of(ancestor);
        }
        false
    }
}

/// One compound selector: optional tag, optional id, and any number of classes.
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, spec: &ElementSpec) -> bool {
        if let Some(tag) = &self.tag
            && tag != "*"
            && *tag != spec.tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && spec.id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| spec.classes.iter().any(|c| c == class))
    }
}

/// Parse the descendant-combinator subset of CSS selectors (`nav .item a`).
fn parse_selector(selector: &str) -> Result<Vec<Compound>, DomError> {
    let invalid = |message: &str| DomError::InvalidSelector {
        selector: selector.to_string(),
        message: message.to_string(),
    };

    let chain = selector
        .split_whitespace()
        .map(|part| parse_compound(part).ok_or_else(|| invalid("unsupported syntax")))
        .collect::<Result<Vec<_>, _>>()?;

    if chain.is_empty() {
        return Err(invalid("empty selector"));
    }
    Ok(chain)
}

fn parse_compound(part: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = part;

    let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if !is_name(tag) && tag != "*" {
            return None;
        }
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if !is_name(name) {
            return None;
        }
        match marker {
            '.' => compound.classes.push(name.to_string()),
            '#' => compound.id = Some(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }
    Some(compound)
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl DomAccess for InMemoryDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.spec.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, root: &NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let chain = parse_selector(selector)?;
        let count = self.len();
        Ok((0..count)
            .map(NodeId)
            .filter(|node| self.is_descendant(*node, *root) && self.matches(*node, &chain))
            .collect())
    }

    fn id_of(&self, element: &NodeId) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .and_then(|node| node.spec.id.clone())
            .unwrap_or_default()
    }

    fn offset_top(&self, element: &NodeId) -> i32 {
        self.nodes
            .borrow()
            .get(element.0)
            .map_or(0, |node| node.spec.offset_top)
    }

    fn link_hash(&self, element: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        match nodes
            .get(element.0)
            .and_then(|node| node.spec.href.as_deref())
            .and_then(|href| href.split_once('#'))
        {
            Some((_, fragment)) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    fn scroll_top(&self) -> i32 {
        self.scroll_top.get()
    }

    fn set_class(&self, element: &NodeId, class: &str, present: bool) -> Result<(), DomError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes
            .get_mut(element.0)
            .ok_or_else(|| DomError::NotFound(format!("node {}", element.0)))?;
        let classes = &mut node.spec.classes;
        let has = classes.iter().any(|c| c == class);
        if present && !has {
            classes.push(class.to_string());
        } else if !present && has {
            classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|node| node.spec.classes.iter().any(|c| c == class))
    }
}
