//! Event subscriptions. Each handler turns a browser event into an immutable
//! description, asks the page context for commands, and applies them.

use std::rc::Rc;

use folio_core::diagnostics::LoadTiming;
use folio_core::scroll::fragment_id;
use folio_core::{ClickOrigin, ScrollSample};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlElement, Node,
    PerformanceNavigationTiming,
};

use crate::dom::{query_all, query_one};
use crate::host::{SharedHost, apply};
use crate::log;

pub fn install(host: &SharedHost) -> Result<(), JsValue> {
    menu(host)?;
    anchors(host)?;
    scroll(host)?;
    contact(host)?;
    load_timing(host)?;
    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn menu(host: &SharedHost) -> Result<(), JsValue> {
    let (trigger, menu, document) = {
        let h = host.borrow();
        let Some(layout) = h.menu else {
            return Ok(());
        };
        let (Some(trigger), Some(menu)) =
            (h.elements.get(layout.trigger), h.elements.get(layout.menu))
        else {
            return Ok(());
        };
        (trigger.clone(), menu.clone(), h.document.clone())
    };

    let handle = Rc::clone(host);
    listen(&trigger, "click", move |_| {
        let commands = handle.borrow_mut().page.on_menu_trigger();
        apply(&handle, commands);
    })?;

    let handle = Rc::clone(host);
    listen(&document, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let origin = ClickOrigin {
            inside_trigger: trigger.contains(target.as_ref()),
            inside_menu: menu.contains(target.as_ref()),
        };
        let commands = handle.borrow_mut().page.on_document_click(origin);
        apply(&handle, commands);
    })
}

fn anchors(host: &SharedHost) -> Result<(), JsValue> {
    let (links, document) = {
        let h = host.borrow();
        let links = query_all(&h.document, &h.page.config().selectors.anchor);
        (links, h.document.clone())
    };

    for link in links {
        let handle = Rc::clone(host);
        let document = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let target_top = fragment_id(&href)
                .and_then(|id| document.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| f64::from(el.offset_top()));
            let commands = handle.borrow_mut().page.on_anchor_click(target_top);
            apply(&handle, commands);
        })?;
    }
    Ok(())
}

fn scroll(host: &SharedHost) -> Result<(), JsValue> {
    let window = host.borrow().window.clone();
    let handle = Rc::clone(host);
    let on_scroll = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if !handle.borrow_mut().page.on_scroll() {
            return;
        }
        let frame_handle = Rc::clone(&handle);
        let frame = Closure::once_into_js(move || run_frame(&frame_handle));
        let requested = handle
            .borrow()
            .window
            .request_animation_frame(frame.unchecked_ref());
        if let Err(err) = requested {
            // Without a frame the pacer would stay stuck; update right away.
            log::warn_js("requestAnimationFrame failed", &err);
            run_frame(&handle);
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &options,
    )?;
    on_scroll.forget();
    Ok(())
}

fn run_frame(host: &SharedHost) {
    let sample = {
        let h = host.borrow();
        ScrollSample {
            scroll_y: h.window.scroll_y().unwrap_or(0.0),
            viewport_height: h
                .window
                .inner_height()
                .ok()
                .as_ref()
                .and_then(JsValue::as_f64)
                .unwrap_or(0.0),
        }
    };
    let commands = host.borrow_mut().page.on_frame(sample);
    apply(host, commands);
}

fn contact(host: &SharedHost) -> Result<(), JsValue> {
    let links = {
        let h = host.borrow();
        let selectors = &h.page.config().selectors;
        match query_one(&h.document, &selectors.contact_section) {
            Some(section) => query_all(&section, &selectors.contact_link),
            None => return Ok(()),
        }
    };

    for link in links {
        let handle = Rc::clone(host);
        let href = link.get_attribute("href").unwrap_or_default();
        listen(&link, "click", move |_| {
            let commands = handle.borrow().page.on_contact_click(&href);
            apply(&handle, commands);
        })?;
    }
    Ok(())
}

fn load_timing(host: &SharedHost) -> Result<(), JsValue> {
    let (window, complete) = {
        let h = host.borrow();
        let state = h.document.ready_state();
        (h.window.clone(), state == "complete")
    };

    if complete {
        return report_load_timing(host);
    }
    let handle = Rc::clone(host);
    listen(&window, "load", move |_| {
        if let Err(err) = report_load_timing(&handle) {
            log::warn_js("load timing unavailable", &err);
        }
    })
}

/// `loadEventEnd` is only filled in after the load handlers return, so read
/// it on the next task.
fn report_load_timing(host: &SharedHost) -> Result<(), JsValue> {
    let handle = Rc::clone(host);
    let callback = Closure::once_into_js(move || {
        let commands = {
            let h = handle.borrow();
            let timing = h
                .window
                .performance()
                .and_then(|p| {
                    p.get_entries_by_type("navigation")
                        .get(0)
                        .dyn_into::<PerformanceNavigationTiming>()
                        .ok()
                })
                .map(|nav| LoadTiming {
                    load_event_start: nav.load_event_start(),
                    load_event_end: nav.load_event_end(),
                });
            h.page.on_page_loaded(timing)
        };
        apply(&handle, commands);
    });
    host.borrow()
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)?;
    Ok(())
}
