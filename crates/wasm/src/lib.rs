//! WebAssembly bindings for Lucius scroll navigation.
//!
//! This crate runs the `lucius-nav` highlighter inside a browser page: it
//! implements [`lucius_traits::DomAccess`] on top of `web-sys` and wires the
//! ready, click and scroll events to a [`lucius_nav::NavSession`].
//!
//! # Architecture
//!
//! - [`dom`] - `BrowserDom`, the `web-sys` implementation of `DomAccess`
//! - [`wiring`] - deferred start on `DOMContentLoaded` and listener registration
//! - [`error`] - Error types with JavaScript interop
//!
//! With the default `auto-start` feature the module attaches itself with the
//! stock configuration as soon as it is loaded, which is all the default site
//! theme needs. Pages with different ids or classes disable the feature and
//! call `attachScrollNav` themselves.
//!
//! # Example
//!
//! Build without the auto-start attach first, otherwise the default
//! configuration is attached as well and reports its missing elements:
//!
//! ```toml
//! lucius-wasm = { path = "crates/wasm", default-features = false }
//! ```
//!
//! ```javascript
//! import init, { attachScrollNav } from './lucius_wasm.js';
//!
//! await init();
//! attachScrollNav({ menuId: 'sidebar', tolerance: 60 });
//! ```

pub mod dom;
pub mod error;
pub mod wiring;

pub use dom::BrowserDom;
pub use error::{ErrorCode, NavJsError};

use lucius_nav::NavConfig;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hooks for better error messages in the browser console and,
/// with `auto-start`, attaches the navigation using the default configuration.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }

    #[cfg(feature = "auto-start")]
    {
        if let Err(err) = wiring::attach(NavConfig::default()) {
            log::error!("Scroll navigation disabled: {err}");
            web_sys::console::error_1(&JsValue::from(err));
        }
    }
}

/// Attach the scroll navigation with a custom configuration.
///
/// `config` is a partial `NavConfig` object (`contentId`, `pageSelector`,
/// `menuId`, `linkSelector`, `toggleButtonId`, `activeClass`, `visibleClass`,
/// `tolerance`); `undefined` or `null` selects the defaults.
#[wasm_bindgen(js_name = attachScrollNav)]
pub fn attach_scroll_nav(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    wiring::attach(config)?;
    Ok(())
}

/// Get the version of the lucius-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_config(config: JsValue) -> Result<NavConfig, NavJsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(NavConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| NavJsError::config(format!("Invalid configuration object: {e}")))
}
