use std::rc::Rc;

use folio_protocol::{IntersectionEntry, ObserverKind, ObserverOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::host::{SharedHost, apply};

pub fn supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Create one observer per kind, configured from the page context.
pub fn install(host: &SharedHost) -> Result<(), JsValue> {
    let kinds = {
        let h = host.borrow();
        let config = h.page.config();
        [
            (ObserverKind::Reveal, config.reveal.observer_options()),
            (ObserverKind::SkillSection, config.skills.observer_options()),
            (ObserverKind::LazyImage, config.lazy.observer_options()),
        ]
    };
    for (kind, options) in kinds {
        let observer = create(host, kind, options)?;
        host.borrow_mut().observers.insert(kind, observer);
    }
    Ok(())
}

fn create(
    host: &SharedHost,
    kind: ObserverKind,
    options: ObserverOptions,
) -> Result<IntersectionObserver, JsValue> {
    let handle = Rc::clone(host);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _: IntersectionObserver| {
            let batch: Vec<IntersectionEntry> = {
                let h = handle.borrow();
                entries
                    .iter()
                    .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = h.elements.lookup(&entry.target())?;
                        Some(IntersectionEntry::new(
                            target,
                            entry.is_intersecting(),
                            entry.intersection_ratio(),
                        ))
                    })
                    .collect()
            };
            let commands = handle.borrow_mut().page.on_intersections(kind, &batch);
            apply(&handle, commands);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin.to_string());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    // The observer lives as long as the page.
    callback.forget();
    Ok(observer)
}
