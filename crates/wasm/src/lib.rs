mod dom;
mod host;
mod log;
mod observe;
mod wiring;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use host::{Host, SharedHost};

thread_local! {
    /// The context for the current page view. Dropped with the page.
    static PAGE: RefCell<Option<SharedHost>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Redirect panics to console
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        boot();
        return Ok(());
    }

    let on_ready = Closure::once_into_js(boot);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

fn boot() {
    if PAGE.with(|page| page.borrow().is_some()) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    match Host::boot(window, document) {
        Ok(host) => PAGE.with(|page| *page.borrow_mut() = Some(host)),
        Err(err) => log::error_js("failed to start", &err),
    }
}

/// Pending reveal work as JSON, for inspection from the devtools console.
#[wasm_bindgen]
pub fn reveal_status() -> Result<String, JsError> {
    let status = PAGE.with(|page| {
        page.borrow()
            .as_ref()
            .map(|host| host.borrow().page.status())
    });
    let status = status.ok_or_else(|| JsError::new("page not booted yet"))?;
    serde_json::to_string(&status).map_err(|e| JsError::new(&e.to_string()))
}
