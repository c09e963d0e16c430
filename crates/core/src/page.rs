use folio_protocol::{DomCommand, ElementId, IntersectionEntry, ObserverKind};
use serde::Serialize;

use crate::config::FolioConfig;
use crate::diagnostics::{ContactLink, LoadTiming};
use crate::lazy::LazyImages;
use crate::menu::{ClickOrigin, MobileMenu};
use crate::reveal::{RevealController, SkillBar};
use crate::scroll::{ScrollEffects, ScrollSample, anchor_destination};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSection {
    pub id: ElementId,
    /// Progress bars in document order.
    pub bars: Vec<SkillBar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage {
    pub id: ElementId,
    pub deferred_src: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLayout {
    pub trigger: ElementId,
    pub menu: ElementId,
    pub icon: Option<ElementId>,
    /// Whether the menu is visible at load.
    pub open: bool,
}

/// Everything the host found in the document at page-ready.
///
/// Absent elements are simply missing here; the features that need them
/// stay inert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub reveal: Vec<ElementId>,
    pub skill_sections: Vec<SkillSection>,
    pub lazy_images: Vec<LazyImage>,
    pub menu: Option<MenuLayout>,
    pub nav: Option<ElementId>,
    pub hero: Option<ElementId>,
}

/// Pending work, for inspection from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub pending_reveals: usize,
    pub pending_skill_sections: usize,
    pub pending_images: usize,
    pub menu_open: bool,
}

/// Per-page-load state.
///
/// Built once when the document is ready and dropped with the page. Every
/// handler takes an immutable description of the event and returns the
/// commands the host must execute, in order.
#[derive(Debug, Clone)]
pub struct PageContext {
    config: FolioConfig,
    reveal: RevealController,
    lazy: LazyImages,
    menu: Option<MobileMenu>,
    scroll: ScrollEffects,
}

impl PageContext {
    /// Build the context and return the commands that put the page into its
    /// pre-reveal state (hidden fade targets, collapsed bars, observers).
    pub fn mount(config: FolioConfig, layout: PageLayout) -> (Self, Vec<DomCommand>) {
        let mut ctx = Self {
            reveal: RevealController::new(config.reveal.clone(), config.skills.clone()),
            lazy: LazyImages::new(config.lazy.clone()),
            menu: layout
                .menu
                .map(|m| MobileMenu::new(config.menu.clone(), m.menu, m.icon, m.open)),
            scroll: ScrollEffects::new(config.scroll.clone(), layout.nav, layout.hero),
            config,
        };

        let mut commands: Vec<DomCommand> = ctx
            .config
            .preload_styles
            .iter()
            .map(|href| DomCommand::Preload {
                href: href.clone(),
                kind: "style".into(),
            })
            .collect();

        for id in layout.reveal {
            commands.extend(ctx.reveal.register_fade(id));
        }
        for section in layout.skill_sections {
            commands.extend(ctx.reveal.register_skill_section(section.id, &section.bars));
        }
        for image in layout.lazy_images {
            commands.extend(ctx.lazy.register(image.id, image.deferred_src.as_deref()));
        }

        (ctx, commands)
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn on_intersections(
        &mut self,
        kind: ObserverKind,
        entries: &[IntersectionEntry],
    ) -> Vec<DomCommand> {
        match kind {
            ObserverKind::LazyImage => self.lazy.on_intersections(entries),
            ObserverKind::Reveal | ObserverKind::SkillSection => {
                self.reveal.on_intersections(kind, entries)
            }
        }
    }

    /// Apply every pending reveal and image load at once. Used when the host
    /// has no viewport observer to offer.
    pub fn reveal_without_observer(&mut self) -> Vec<DomCommand> {
        let mut commands = self.reveal.reveal_all();
        commands.extend(self.lazy.load_all());
        commands
    }

    pub fn on_menu_trigger(&mut self) -> Vec<DomCommand> {
        self.menu.as_mut().map(MobileMenu::toggle).unwrap_or_default()
    }

    pub fn on_document_click(&mut self, origin: ClickOrigin) -> Vec<DomCommand> {
        self.menu
            .as_mut()
            .map(|m| m.on_document_click(origin))
            .unwrap_or_default()
    }

    /// In-page link clicked. `target_top` is the target's offset from the
    /// document top, or `None` when the fragment names nothing.
    pub fn on_anchor_click(&mut self, target_top: Option<f64>) -> Vec<DomCommand> {
        let Some(top) = target_top else {
            return Vec::new();
        };
        let mut commands = vec![DomCommand::ScrollTo {
            top: anchor_destination(top, self.config.scroll.anchor_offset_px),
            smooth: true,
        }];
        if let Some(menu) = self.menu.as_mut() {
            commands.extend(menu.close());
        }
        commands
    }

    /// Returns `true` when the host should request an animation frame.
    pub fn on_scroll(&mut self) -> bool {
        self.scroll.on_scroll()
    }

    pub fn on_frame(&mut self, sample: ScrollSample) -> Vec<DomCommand> {
        self.scroll.on_frame(sample)
    }

    pub fn on_contact_click(&self, href: &str) -> Vec<DomCommand> {
        ContactLink::parse(href)
            .map(|link| vec![link.log()])
            .unwrap_or_default()
    }

    pub fn on_page_loaded(&self, timing: Option<LoadTiming>) -> Vec<DomCommand> {
        timing.map(|t| vec![t.log()]).unwrap_or_default()
    }

    pub fn status(&self) -> PageStatus {
        PageStatus {
            pending_reveals: self.reveal.fade().pending(),
            pending_skill_sections: self.reveal.skills().pending(),
            pending_images: self.lazy.pending(),
            menu_open: self.menu.as_ref().is_some_and(MobileMenu::is_open),
        }
    }
}
