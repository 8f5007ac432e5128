//! Event listener registration.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `Closure::forget` once registered.

use crate::dom::BrowserDom;
use crate::error::NavJsError;
use lucius_nav::{NavConfig, NavContext, NavEvent, NavSession};
use lucius_traits::DomAccess;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

type SharedSession = Rc<RefCell<NavSession<Element>>>;

/// Start the navigation once the document is parsed.
///
/// If the document is still loading, initialization is deferred to
/// `DOMContentLoaded` and any failure at that point is reported on the
/// console. Otherwise it runs immediately and failures are returned.
pub fn attach(config: NavConfig) -> Result<(), NavJsError> {
    let dom = BrowserDom::from_window()?;

    if dom.document().ready_state() != "loading" {
        return start(dom, config);
    }

    let target: EventTarget = dom.document().clone().into();
    let mut pending = Some((dom, config));
    let on_ready = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let Some((dom, config)) = pending.take() else {
            return;
        };
        if let Err(err) = start(dom, config) {
            log::error!("Scroll navigation disabled: {err}");
            web_sys::console::error_1(&JsValue::from(err));
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| NavJsError::listener("DOMContentLoaded", &e))?;
    on_ready.forget();
    Ok(())
}

/// Capture the context, highlight once, then wire the click and scroll handlers.
fn start(dom: BrowserDom, config: NavConfig) -> Result<(), NavJsError> {
    let ctx = NavContext::initialize(&dom, config)?;
    let toggle_button: EventTarget = ctx.toggle_button.clone().into();
    let content: EventTarget = ctx.content.clone().into();

    let dom = Rc::new(dom);
    let session: SharedSession = Rc::new(RefCell::new(NavSession::new(ctx)));

    let ready = NavEvent::Ready {
        scroll_position: dom.scroll_top(),
    };
    session.borrow_mut().dispatch(dom.as_ref(), ready)?;

    listen(&toggle_button, "click", false, &dom, &session, |_| {
        NavEvent::ToggleClick
    })?;
    listen(&content, "click", false, &dom, &session, |_| {
        NavEvent::ContentClick
    })?;

    let window: EventTarget = web_sys::window()
        .ok_or_else(|| NavJsError::config("no window object"))?
        .into();
    listen(&window, "scroll", true, &dom, &session, |dom| {
        NavEvent::Scroll {
            scroll_position: dom.scroll_top(),
        }
    })?;

    Ok(())
}

/// Register a handler that turns a DOM event into a `NavEvent` and dispatches it.
///
/// Failures inside one invocation are logged and do not affect later events.
fn listen(
    target: &EventTarget,
    event_name: &'static str,
    passive: bool,
    dom: &Rc<BrowserDom>,
    session: &SharedSession,
    to_event: fn(&BrowserDom) -> NavEvent,
) -> Result<(), NavJsError> {
    let dom = Rc::clone(dom);
    let session = Rc::clone(session);
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let event = to_event(&dom);
        let Ok(mut session) = session.try_borrow_mut() else {
            log::warn!("Dropped re-entrant '{event_name}' event");
            return;
        };
        if let Err(err) = session.dispatch(dom.as_ref(), event) {
            log::warn!("'{event_name}' handler failed: {err}");
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            handler.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| NavJsError::listener(event_name, &e))?;
    handler.forget();

    log::debug!("Listening for '{event_name}'");
    Ok(())
}
