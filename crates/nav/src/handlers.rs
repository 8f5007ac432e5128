//! Event handlers for the scroll navigation.
//!
//! Handlers are pure: they read the [`NavContext`] and the current menu state
//! and return [`Instruction`]s. [`apply_instructions`] is the only place that
//! touches class lists.

use crate::context::NavContext;
use crate::error::NavError;
use crate::menu::MenuState;
use lucius_traits::DomAccess;

/// A browser event the navigation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The document finished parsing.
    Ready { scroll_position: i32 },
    Scroll { scroll_position: i32 },
    ToggleClick,
    ContentClick,
}

/// A class-list change to perform on the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Remove the active class from every indexed link.
    ClearActive,
    /// Add the active class to the link for this fragment.
    SetActive(String),
    /// Add or remove the visible class on the menu.
    SetMenuVisible(bool),
}

/// Work out which link should be active for `scroll_position`.
///
/// Returns no instructions when every anchor is more than the tolerance above
/// the viewport, or when the selected anchor has no link; the previous
/// highlight stays in place in both cases.
pub fn highlight_active_link<E>(ctx: &NavContext<E>, scroll_position: i32) -> Vec<Instruction> {
    let Some(anchor) = ctx.anchors.select(scroll_position, ctx.config.tolerance) else {
        return Vec::new();
    };

    if !ctx.links.contains(&anchor.id) {
        log::debug!(
            "No menu link for anchor #{} at scroll position {}",
            anchor.id,
            scroll_position
        );
        return Vec::new();
    }

    vec![
        Instruction::ClearActive,
        Instruction::SetActive(anchor.id.clone()),
    ]
}

/// Flip the menu between open and closed.
pub fn toggle_menu(state: MenuState) -> (MenuState, Vec<Instruction>) {
    let next = state.toggled();
    (next, vec![Instruction::SetMenuVisible(next.is_open())])
}

/// Close the menu regardless of its current state.
pub fn close_menu(state: MenuState) -> (MenuState, Vec<Instruction>) {
    let next = state.closed();
    (next, vec![Instruction::SetMenuVisible(false)])
}

/// Perform `instructions` against the document.
///
/// Stops at the first class-list failure. A `SetActive` for a fragment that
/// is not indexed is skipped.
pub fn apply_instructions<D: DomAccess>(
    dom: &D,
    ctx: &NavContext<D::Element>,
    instructions: &[Instruction],
) -> Result<(), NavError> {
    let config = &ctx.config;
    for instruction in instructions {
        match instruction {
            Instruction::ClearActive => {
                for link in ctx.links.links() {
                    dom.set_class(link, &config.active_class, false)?;
                }
            }
            Instruction::SetActive(fragment) => match ctx.links.get(fragment) {
                Some(link) => dom.set_class(link, &config.active_class, true)?,
                None => log::debug!("Skipping highlight for unindexed link #{fragment}"),
            },
            Instruction::SetMenuVisible(visible) => {
                dom.set_class(&ctx.menu, &config.visible_class, *visible)?;
            }
        }
    }
    Ok(())
}

/// The initialization context plus the menu state, driven one event at a time.
#[derive(Debug, Clone)]
pub struct NavSession<E> {
    ctx: NavContext<E>,
    menu: MenuState,
}

impl<E> NavSession<E> {
    /// Start a session in the menu state recorded at initialization.
    pub fn new(ctx: NavContext<E>) -> Self {
        let menu = ctx.initial_menu;
        Self { ctx, menu }
    }

    pub fn context(&self) -> &NavContext<E> {
        &self.ctx
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    /// Update the menu state for `event` and return the resulting instructions.
    pub fn handle(&mut self, event: NavEvent) -> Vec<Instruction> {
        match event {
            NavEvent::Ready { scroll_position } | NavEvent::Scroll { scroll_position } => {
                highlight_active_link(&self.ctx, scroll_position)
            }
            NavEvent::ToggleClick => {
                let (next, instructions) = toggle_menu(self.menu);
                self.menu = next;
                instructions
            }
            NavEvent::ContentClick => {
                let (next, instructions) = close_menu(self.menu);
                self.menu = next;
                instructions
            }
        }
    }

    /// Handle `event` and apply the instructions to `dom`.
    ///
    /// Menu events first re-read the visible class, so a menu opened or
    /// closed by other scripts toggles from what the page shows.
    pub fn dispatch<D>(&mut self, dom: &D, event: NavEvent) -> Result<(), NavError>
    where
        D: DomAccess<Element = E>,
    {
        if matches!(event, NavEvent::ToggleClick | NavEvent::ContentClick) {
            let visible = dom.has_class(&self.ctx.menu, &self.ctx.config.visible_class);
            self.menu = MenuState::from_visible(visible);
        }
        let instructions = self.handle(event);
        apply_instructions(dom, &self.ctx, &instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavConfig;
    use crate::test_support::sample_dom;
    use lucius_traits::{ElementSpec, InMemoryDom};

    fn active_fragments(dom: &InMemoryDom) -> Vec<String> {
        dom.elements_with_class("active")
            .iter()
            .map(|node| dom.link_hash(node).trim_start_matches('#').to_string())
            .collect()
    }

    fn session() -> (InMemoryDom, NavSession<lucius_traits::NodeId>) {
        let (dom, _) = sample_dom();
        let ctx = NavContext::initialize(&dom, NavConfig::default()).unwrap();
        (dom, NavSession::new(ctx))
    }

    #[test]
    fn test_highlight_instructions() {
        let (_, session) = session();
        let ctx = session.context();

        assert_eq!(
            highlight_active_link(ctx, 750),
            vec![
                Instruction::ClearActive,
                Instruction::SetActive("features".to_string())
            ]
        );
        assert!(highlight_active_link(ctx, 5000).is_empty());
    }

    #[test]
    fn test_scroll_sequence_moves_highlight() {
        let (dom, mut session) = session();

        session
            .dispatch(&dom, NavEvent::Ready { scroll_position: 0 })
            .unwrap();
        assert_eq!(active_fragments(&dom), vec!["intro"]);

        for (position, expected) in [(100, "intro"), (101, "features"), (900, "features"), (901, "faq")] {
            session
                .dispatch(&dom, NavEvent::Scroll { scroll_position: position })
                .unwrap();
            assert_eq!(active_fragments(&dom), vec![expected], "at {position}");
        }
    }

    #[test]
    fn test_past_last_anchor_keeps_previous_highlight() {
        let (dom, mut session) = session();
        session
            .dispatch(&dom, NavEvent::Scroll { scroll_position: 1600 })
            .unwrap();
        session
            .dispatch(&dom, NavEvent::Scroll { scroll_position: 9000 })
            .unwrap();
        assert_eq!(active_fragments(&dom), vec!["faq"]);
    }

    #[test]
    fn test_at_most_one_active_link() {
        let (dom, mut session) = session();
        for position in (-200..2200).step_by(37) {
            session
                .dispatch(&dom, NavEvent::Scroll { scroll_position: position })
                .unwrap();
            assert!(dom.elements_with_class("active").len() <= 1, "at {position}");
        }
    }

    #[test]
    fn test_unmatched_anchor_leaves_previous_link() {
        let dom = InMemoryDom::new();
        let content = dom.append(None, ElementSpec::new("main").id("content"));
        dom.append(
            Some(content),
            ElementSpec::new("section").id("intro").class("page").offset_top(0),
        );
        dom.append(
            Some(content),
            ElementSpec::new("section").id("orphan").class("page").offset_top(800),
        );
        let menu = dom.append(None, ElementSpec::new("nav").id("nav-menu"));
        let list = dom.append(Some(menu), ElementSpec::new("ul").class("menu-list"));
        let intro_link = dom.append(Some(list), ElementSpec::new("a").href("#intro"));
        dom.append(None, ElementSpec::new("button").id("toggle-menu-button"));

        let ctx = NavContext::initialize(&dom, NavConfig::default()).unwrap();
        let mut session = NavSession::new(ctx);

        session
            .dispatch(&dom, NavEvent::Scroll { scroll_position: 0 })
            .unwrap();
        assert!(dom.has_class(&intro_link, "active"));

        assert!(session.handle(NavEvent::Scroll { scroll_position: 750 }).is_empty());
        session
            .dispatch(&dom, NavEvent::Scroll { scroll_position: 750 })
            .unwrap();
        assert!(dom.has_class(&intro_link, "active"));
        assert_eq!(dom.elements_with_class("active"), vec![intro_link]);
    }

    #[test]
    fn test_apply_skips_unindexed_fragment() {
        let (dom, session) = session();
        let result = apply_instructions(
            &dom,
            session.context(),
            &[Instruction::SetActive("nowhere".to_string())],
        );
        assert!(result.is_ok());
        assert!(dom.elements_with_class("active").is_empty());
    }

    #[test]
    fn test_toggle_and_close_menu() {
        let (dom, mut session) = session();
        let menu = session.context().menu;

        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        assert_eq!(session.menu_state(), MenuState::Open);
        assert!(dom.has_class(&menu, "show"));

        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        assert_eq!(session.menu_state(), MenuState::Closed);
        assert!(!dom.has_class(&menu, "show"));

        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        session.dispatch(&dom, NavEvent::ContentClick).unwrap();
        assert_eq!(session.menu_state(), MenuState::Closed);
        assert!(!dom.has_class(&menu, "show"));

        session.dispatch(&dom, NavEvent::ContentClick).unwrap();
        assert_eq!(session.menu_state(), MenuState::Closed);
        assert!(!dom.has_class(&menu, "show"));
    }

    #[test]
    fn test_toggle_starts_from_open_markup() {
        let (dom, ids) = sample_dom();
        dom.set_class(&ids.menu, "show", true).unwrap();
        let ctx = NavContext::initialize(&dom, NavConfig::default()).unwrap();
        let mut session = NavSession::new(ctx);
        assert_eq!(session.menu_state(), MenuState::Open);

        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        assert_eq!(session.menu_state(), MenuState::Closed);
        assert!(!dom.has_class(&ids.menu, "show"));
    }

    #[test]
    fn test_toggle_follows_external_class_changes() {
        let (dom, ids) = sample_dom();
        let ctx = NavContext::initialize(&dom, NavConfig::default()).unwrap();
        let mut session = NavSession::new(ctx);

        dom.set_class(&ids.menu, "show", true).unwrap();
        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        assert!(!dom.has_class(&ids.menu, "show"));

        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        dom.set_class(&ids.menu, "show", false).unwrap();
        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();
        assert!(dom.has_class(&ids.menu, "show"));
        assert_eq!(session.menu_state(), MenuState::Open);
    }

    #[test]
    fn test_menu_handlers_are_pure() {
        assert_eq!(
            toggle_menu(MenuState::Closed),
            (MenuState::Open, vec![Instruction::SetMenuVisible(true)])
        );
        assert_eq!(
            close_menu(MenuState::Open),
            (MenuState::Closed, vec![Instruction::SetMenuVisible(false)])
        );
    }

    #[test]
    fn test_custom_classes_are_used() {
        let (dom, _) = sample_dom();
        let config = NavConfig {
            active_class: "current".to_string(),
            visible_class: "open".to_string(),
            ..NavConfig::default()
        };
        let ctx = NavContext::initialize(&dom, config).unwrap();
        let menu = ctx.menu;
        let mut session = NavSession::new(ctx);

        session
            .dispatch(&dom, NavEvent::Scroll { scroll_position: 0 })
            .unwrap();
        session.dispatch(&dom, NavEvent::ToggleClick).unwrap();

        assert_eq!(dom.elements_with_class("current").len(), 1);
        assert!(dom.elements_with_class("active").is_empty());
        assert!(dom.has_class(&menu, "open"));
    }
}
