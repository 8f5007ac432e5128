use crate::anchors::{AnchorPositions, MenuLinkIndex, build_anchor_positions, build_menu_link_index, require};
use crate::config::NavConfig;
use crate::error::NavError;
use crate::menu::MenuState;
use lucius_traits::DomAccess;

/// Everything captured from the document when navigation starts.
///
/// Built once by [`NavContext::initialize`] and never rebuilt; anchors are not
/// re-measured if the page reflows later.
#[derive(Debug, Clone)]
pub struct NavContext<E> {
    pub config: NavConfig,
    pub anchors: AnchorPositions,
    pub links: MenuLinkIndex<E>,
    pub content: E,
    pub menu: E,
    pub toggle_button: E,
    /// Menu state found in the markup at start-up.
    pub initial_menu: MenuState,
}

impl<E: Clone> NavContext<E> {
    /// Resolve the required elements and record anchors and links.
    ///
    /// Fails fast when the content container, menu or toggle button is
    /// missing; the page is treated as unusable in that case.
    pub fn initialize<D>(dom: &D, config: NavConfig) -> Result<Self, NavError>
    where
        D: DomAccess<Element = E>,
    {
        config.validate()?;

        let content = require(dom, &config.content_id, "content container")?;
        let menu = require(dom, &config.menu_id, "navigation menu")?;
        let toggle_button = require(dom, &config.toggle_button_id, "menu toggle button")?;

        let initial_menu = MenuState::from_visible(dom.has_class(&menu, &config.visible_class));
        let anchors = build_anchor_positions(dom, &config)?;
        let links = build_menu_link_index(dom, &config)?;

        for anchor in anchors.iter().filter(|a| !links.contains(&a.id)) {
            log::warn!("Anchor #{} has no matching menu link", anchor.id);
        }
        log::info!(
            "Scroll navigation ready: {} anchors, {} links",
            anchors.len(),
            links.len()
        );

        Ok(Self {
            config,
            anchors,
            links,
            content,
            menu,
            toggle_button,
            initial_menu,
        })
    }
}
