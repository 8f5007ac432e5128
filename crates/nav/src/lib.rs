//! Scroll-position navigation highlighting for long single-page documents.
//!
//! On start-up [`NavContext::initialize`] records the offset of every page
//! section and indexes the navigation links by fragment. Each scroll event
//! then selects the first section that has not scrolled more than the
//! configured tolerance past the top of the viewport and marks its link
//! active. A toggle button opens and closes the menu on small screens, and a
//! click on the content closes it.
//!
//! All document access goes through [`lucius_traits::DomAccess`], so the same
//! logic runs in the browser (see `lucius-wasm`) and against
//! [`lucius_traits::InMemoryDom`] in tests.
//!
//! # Example
//!
//! ```
//! use lucius_nav::{NavConfig, NavContext, NavEvent, NavSession};
//! use lucius_traits::{DomAccess, ElementSpec, InMemoryDom};
//!
//! let dom = InMemoryDom::new();
//! let content = dom.append(None, ElementSpec::new("main").id("content"));
//! dom.append(Some(content), ElementSpec::new("section").id("intro").class("page"));
//! let menu = dom.append(None, ElementSpec::new("nav").id("nav-menu"));
//! let list = dom.append(Some(menu), ElementSpec::new("ul").class("menu-list"));
//! let link = dom.append(Some(list), ElementSpec::new("a").href("#intro"));
//! dom.append(None, ElementSpec::new("button").id("toggle-menu-button"));
//!
//! let ctx = NavContext::initialize(&dom, NavConfig::default()).unwrap();
//! let mut session = NavSession::new(ctx);
//! session.dispatch(&dom, NavEvent::Ready { scroll_position: 0 }).unwrap();
//! assert!(dom.has_class(&link, "active"));
//! ```

pub mod anchors;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod menu;

pub use anchors::{Anchor, AnchorPositions, MenuLinkIndex, build_anchor_positions, build_menu_link_index};
pub use config::{DEFAULT_TOLERANCE, NavConfig};
pub use context::NavContext;
pub use error::NavError;
pub use handlers::{
    Instruction, NavEvent, NavSession, apply_instructions, close_menu, highlight_active_link,
    toggle_menu,
};
pub use menu::MenuState;
