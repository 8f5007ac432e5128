//! Anchor offsets and the menu link index, both captured once at start-up.

use crate::config::NavConfig;
use crate::error::NavError;
use lucius_traits::DomAccess;

/// A page section and its vertical offset in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub id: String,
    pub offset: i32,
}

/// Section offsets in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorPositions {
    anchors: Vec<Anchor>,
}

impl AnchorPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anchor. A repeated id keeps its original position in the
    /// iteration order and takes the new offset.
    pub fn insert(&mut self, id: impl Into<String>, offset: i32) {
        let id = id.into();
        match self.anchors.iter_mut().find(|anchor| anchor.id == id) {
            Some(existing) => existing.offset = offset,
            None => self.anchors.push(Anchor { id, offset }),
        }
    }

    pub fn get(&self, id: &str) -> Option<i32> {
        self.anchors
            .iter()
            .find(|anchor| anchor.id == id)
            .map(|anchor| anchor.offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// The first anchor, in iteration order, whose offset is at least
    /// `scroll_position - tolerance`. Returns `None` when the viewport has
    /// scrolled more than `tolerance` past every anchor.
    pub fn select(&self, scroll_position: i32, tolerance: i32) -> Option<&Anchor> {
        let threshold = i64::from(scroll_position) - i64::from(tolerance);
        self.anchors
            .iter()
            .find(|anchor| i64::from(anchor.offset) >= threshold)
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for AnchorPositions {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        let mut positions = Self::new();
        for (id, offset) in iter {
            positions.insert(id, offset);
        }
        positions
    }
}

/// Navigation links keyed by the fragment of their target.
#[derive(Debug, Clone)]
pub struct MenuLinkIndex<E> {
    links: Vec<(String, E)>,
}

impl<E> Default for MenuLinkIndex<E> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<E> MenuLinkIndex<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a link under `fragment`. A later link for the same fragment
    /// replaces the earlier one.
    pub fn insert(&mut self, fragment: impl Into<String>, link: E) {
        let fragment = fragment.into();
        match self.links.iter_mut().find(|(key, _)| *key == fragment) {
            Some(entry) => entry.1 = link,
            None => self.links.push((fragment, link)),
        }
    }

    pub fn get(&self, fragment: &str) -> Option<&E> {
        self.links
            .iter()
            .find(|(key, _)| key == fragment)
            .map(|(_, link)| link)
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.get(fragment).is_some()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|(key, _)| key.as_str())
    }

    pub fn links(&self) -> impl Iterator<Item = &E> {
        self.links.iter().map(|(_, link)| link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<E: PartialEq> PartialEq for MenuLinkIndex<E> {
    fn eq(&self, other: &Self) -> bool {
        self.links == other.links
    }
}

/// Scan the page sections inside the content element.
pub fn build_anchor_positions<D: DomAccess>(
    dom: &D,
    config: &NavConfig,
) -> Result<AnchorPositions, NavError> {
    let content = require(dom, &config.content_id, "content container")?;
    let pages = dom.query_all(&content, &config.page_selector)?;

    let positions: AnchorPositions = pages
        .iter()
        .map(|page| (dom.id_of(page), dom.offset_top(page)))
        .collect();

    log::debug!(
        "Recorded {} anchor offsets under #{}",
        positions.len(),
        config.content_id
    );
    Ok(positions)
}

/// Scan the navigation links inside the menu element.
pub fn build_menu_link_index<D: DomAccess>(
    dom: &D,
    config: &NavConfig,
) -> Result<MenuLinkIndex<D::Element>, NavError> {
    let menu = require(dom, &config.menu_id, "navigation menu")?;
    let mut index = MenuLinkIndex::new();
    for link in dom.query_all(&menu, &config.link_selector)? {
        let hash = dom.link_hash(&link);
        let fragment = hash.strip_prefix('#').unwrap_or(&hash).to_string();
        index.insert(fragment, link);
    }

    log::debug!("Indexed {} menu links under #{}", index.len(), config.menu_id);
    Ok(index)
}

pub(crate) fn require<D: DomAccess>(
    dom: &D,
    id: &str,
    role: &'static str,
) -> Result<D::Element, NavError> {
    dom.element_by_id(id).ok_or_else(|| NavError::MissingElement {
        id: id.to_string(),
        role,
    })
}
