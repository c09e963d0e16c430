use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::{FolioConfig, MenuLayout, PageContext};
use folio_protocol::{DomCommand, ElementId, ObserverKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CssStyleDeclaration, Document, HtmlElement, IntersectionObserver, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::dom::{self, ElementTable};
use crate::{log, observe, wiring};

pub type SharedHost = Rc<RefCell<Host>>;

/// Live page state: the core context plus the browser objects it drives.
pub struct Host {
    pub window: Window,
    pub document: Document,
    pub elements: ElementTable,
    pub observers: HashMap<ObserverKind, IntersectionObserver>,
    pub menu: Option<MenuLayout>,
    pub page: PageContext,
}

impl Host {
    /// Scan the document, mount the page context and subscribe to everything.
    pub fn boot(window: Window, document: Document) -> Result<SharedHost, JsValue> {
        let page_override = dom::config_override(&document);
        let (config, warning) = FolioConfig::from_page(page_override.as_deref());
        let mut commands: Vec<DomCommand> = warning.into_iter().collect();

        let mut elements = ElementTable::default();
        let layout = dom::scan(&document, &config, &mut elements);
        let menu = layout.menu;
        let (page, mount) = PageContext::mount(config, layout);
        commands.extend(mount);

        let host = Rc::new(RefCell::new(Host {
            window,
            document,
            elements,
            observers: HashMap::new(),
            menu,
            page,
        }));

        let observing = observe::supported(&host.borrow().window);
        if observing {
            observe::install(&host)?;
        }
        apply(&host, commands);
        if !observing {
            log::info("IntersectionObserver unavailable, revealing everything");
            let commands = host.borrow_mut().page.reveal_without_observer();
            apply(&host, commands);
        }

        wiring::install(&host)?;

        let status = host.borrow().page.status();
        log::info(&format!(
            "{} reveal targets, {} skill sections, {} lazy images",
            status.pending_reveals, status.pending_skill_sections, status.pending_images
        ));
        Ok(host)
    }

    fn style(&self, target: ElementId) -> Option<CssStyleDeclaration> {
        self.elements
            .get(target)
            .and_then(|el| el.dyn_ref::<HtmlElement>())
            .map(HtmlElement::style)
    }

    /// Execute one non-deferred command. Commands aimed at unknown elements
    /// are dropped.
    fn execute(&self, command: DomCommand) -> Result<(), JsValue> {
        match command {
            DomCommand::SetOpacity { target, opacity } => {
                if let Some(style) = self.style(target) {
                    style.set_property("opacity", &opacity.to_string())?;
                }
            }
            DomCommand::SetTranslateY { target, px } => {
                if let Some(style) = self.style(target) {
                    style.set_property("transform", &format!("translateY({px}px)"))?;
                }
            }
            DomCommand::SetTransition { target, transition } => {
                if let Some(style) = self.style(target) {
                    style.set_property("transition", &transition.to_string())?;
                }
            }
            DomCommand::SetWidth { target, width } => {
                if let Some(style) = self.style(target) {
                    style.set_property("width", &width.to_string())?;
                }
            }
            DomCommand::AddClass { target, class } => {
                if let Some(el) = self.elements.get(target) {
                    el.class_list().add_1(&class)?;
                }
            }
            DomCommand::RemoveClass { target, class } => {
                if let Some(el) = self.elements.get(target) {
                    el.class_list().remove_1(&class)?;
                }
            }
            DomCommand::SetAttribute {
                target,
                name,
                value,
            } => {
                if let Some(el) = self.elements.get(target) {
                    el.set_attribute(&name, &value)?;
                }
            }
            DomCommand::Observe { observer, target } => {
                if let (Some(obs), Some(el)) =
                    (self.observers.get(&observer), self.elements.get(target))
                {
                    obs.observe(el);
                }
            }
            DomCommand::Unobserve { observer, target } => {
                if let (Some(obs), Some(el)) =
                    (self.observers.get(&observer), self.elements.get(target))
                {
                    obs.unobserve(el);
                }
            }
            DomCommand::ScrollTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(if smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Auto
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::Preload { href, kind } => {
                let link = self.document.create_element("link")?;
                link.set_attribute("rel", "preload")?;
                link.set_attribute("as", &kind)?;
                link.set_attribute("href", &href)?;
                if let Some(head) = self.document.head() {
                    head.append_child(&link)?;
                }
            }
            DomCommand::Log { level, message } => log::emit(level, &message),
            // Scheduled by `apply`, which owns the shared handle.
            DomCommand::Defer { .. } => {}
        }
        Ok(())
    }
}

/// Execute `commands` in order. A failing command is logged and skipped.
///
/// The host is borrowed once per command and never across a call that can
/// run page callbacks.
pub fn apply(host: &SharedHost, commands: Vec<DomCommand>) {
    for command in commands {
        let result = match command {
            DomCommand::Defer { delay_ms, command } => schedule(host, delay_ms, *command),
            other => host.borrow().execute(other),
        };
        if let Err(err) = result {
            log::warn_js("command failed", &err);
        }
    }
}

fn schedule(host: &SharedHost, delay_ms: u32, command: DomCommand) -> Result<(), JsValue> {
    let handle = Rc::clone(host);
    let callback = Closure::once_into_js(move || apply(&handle, vec![command]));
    let window = host.borrow().window.clone();
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )?;
    Ok(())
}
