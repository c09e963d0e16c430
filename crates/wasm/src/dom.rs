use folio_core::config::FolioConfig;
use folio_core::{LazyImage, MenuLayout, PageLayout, SkillBar, SkillSection};
use folio_protocol::ElementId;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::log;

/// Id of the `<script type="application/json">` holding a config override.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Maps core handles to live elements. Ids are indices into the table; the
/// reverse direction goes through a JS `Map` keyed by element identity.
#[derive(Debug)]
pub struct ElementTable {
    elements: Vec<Element>,
    ids: js_sys::Map,
}

impl Default for ElementTable {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            ids: js_sys::Map::new(),
        }
    }
}

impl ElementTable {
    pub fn intern(&mut self, element: Element) -> ElementId {
        if let Some(id) = self.lookup(&element) {
            return id;
        }
        let id = ElementId(self.elements.len() as u32);
        self.ids.set(&element, &JsValue::from(id.0));
        self.elements.push(element);
        id
    }

    pub fn lookup(&self, element: &Element) -> Option<ElementId> {
        self.ids
            .get(element)
            .as_f64()
            .map(|index| ElementId(index as u32))
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }
}

/// Something selectors can be run against.
pub trait Scope {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
}

impl Scope for Document {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }

    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

impl Scope for Element {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }

    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

/// All elements under `scope` matching `selector`, in document order. An
/// invalid selector matches nothing.
pub fn query_all(scope: &impl Scope, selector: &str) -> Vec<Element> {
    let list = match scope.select_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn_js(&format!("bad selector {selector:?}"), &err);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_one(scope: &impl Scope, selector: &str) -> Option<Element> {
    match scope.select(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn_js(&format!("bad selector {selector:?}"), &err);
            None
        }
    }
}

/// Text of the page's config override script, if the page has one.
pub fn config_override(document: &Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .map(|script| script.text_content().unwrap_or_default())
}

/// Find every element the page context cares about, interning each one.
pub fn scan(document: &Document, config: &FolioConfig, table: &mut ElementTable) -> PageLayout {
    let sel = &config.selectors;

    let reveal = query_all(document, &sel.reveal)
        .into_iter()
        .map(|el| table.intern(el))
        .collect();

    let skill_sections = query_all(document, &sel.skill_section)
        .into_iter()
        .filter_map(|section| {
            let bars: Vec<SkillBar> = query_all(&section, &sel.skill_progress)
                .into_iter()
                .map(|bar| skill_bar(bar, &config.skills.width_attribute, table))
                .collect();
            if bars.is_empty() {
                return None;
            }
            Some(SkillSection {
                id: table.intern(section),
                bars,
            })
        })
        .collect();

    let lazy_images = query_all(document, &sel.lazy_image)
        .into_iter()
        .map(|img| LazyImage {
            deferred_src: img.get_attribute(&config.lazy.source_attribute),
            id: table.intern(img),
        })
        .collect();

    let menu = match (
        query_one(document, &sel.menu_trigger),
        query_one(document, &sel.menu),
    ) {
        (Some(trigger), Some(menu)) => {
            let icon = query_one(&trigger, &sel.menu_icon).map(|i| table.intern(i));
            let open = !menu.class_list().contains(&config.menu.hidden_class);
            Some(MenuLayout {
                trigger: table.intern(trigger),
                menu: table.intern(menu),
                icon,
                open,
            })
        }
        _ => None,
    };

    PageLayout {
        reveal,
        skill_sections,
        lazy_images,
        menu,
        nav: query_one(document, &sel.nav).map(|el| table.intern(el)),
        hero: query_one(document, &sel.hero).map(|el| table.intern(el)),
    }
}

fn skill_bar(bar: Element, width_attribute: &str, table: &mut ElementTable) -> SkillBar {
    let inline_width = bar
        .dyn_ref::<HtmlElement>()
        .and_then(|el| el.style().get_property_value("width").ok())
        .filter(|w| !w.is_empty());
    SkillBar {
        stored_width: bar.get_attribute(width_attribute),
        inline_width,
        id: table.intern(bar),
    }
}
