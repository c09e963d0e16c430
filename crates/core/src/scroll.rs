use folio_protocol::{DomCommand, ElementId};

use crate::config::ScrollConfig;

/// Coalesces scroll events into at most one update per animation frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePacer {
    ticking: bool,
}

impl FramePacer {
    /// Returns `true` when the caller should request an animation frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn complete(&mut self) {
        self.ticking = false;
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
}

/// Scroll position read at the start of an animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

/// Nav shadow and hero parallax.
#[derive(Debug, Clone)]
pub struct ScrollEffects {
    config: ScrollConfig,
    nav: Option<ElementId>,
    hero: Option<ElementId>,
    pacer: FramePacer,
    shadowed: Option<bool>,
}

impl ScrollEffects {
    pub fn new(config: ScrollConfig, nav: Option<ElementId>, hero: Option<ElementId>) -> Self {
        Self {
            config,
            nav,
            hero,
            pacer: FramePacer::default(),
            shadowed: None,
        }
    }

    pub fn on_scroll(&mut self) -> bool {
        self.pacer.request()
    }

    pub fn on_frame(&mut self, sample: ScrollSample) -> Vec<DomCommand> {
        self.pacer.complete();

        let mut commands = Vec::new();
        if let Some(nav) = self.nav {
            let shadow = sample.scroll_y > self.config.shadow_after_px;
            // Only touch the class list when the state flips.
            if self.shadowed != Some(shadow) {
                self.shadowed = Some(shadow);
                let class = self.config.shadow_class.clone();
                commands.push(if shadow {
                    DomCommand::AddClass { target: nav, class }
                } else {
                    DomCommand::RemoveClass { target: nav, class }
                });
            }
        }

        if let Some(hero) = self.hero
            && sample.scroll_y < sample.viewport_height
        {
            commands.push(DomCommand::SetTranslateY {
                target: hero,
                px: sample.scroll_y * self.config.parallax_factor,
            });
        }

        commands
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }
}

/// The element id named by an in-page link, if any. `"#"` alone names nothing.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Window scroll offset that puts `target_top` just below the fixed nav.
pub fn anchor_destination(target_top: f64, offset_px: f64) -> f64 {
    target_top - offset_px
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: ElementId = ElementId(1);
    const HERO: ElementId = ElementId(2);

    fn effects() -> ScrollEffects {
        ScrollEffects::new(ScrollConfig::default(), Some(NAV), Some(HERO))
    }

    fn sample(scroll_y: f64) -> ScrollSample {
        ScrollSample {
            scroll_y,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn pacer_requests_once_per_frame() {
        let mut fx = effects();
        assert!(fx.on_scroll());
        assert!(!fx.on_scroll());
        assert!(!fx.on_scroll());
        assert!(fx.pacer().is_ticking());

        fx.on_frame(sample(10.0));
        assert!(!fx.pacer().is_ticking());
        assert!(fx.on_scroll());
    }

    #[test]
    fn shadow_follows_threshold() {
        let mut fx = effects();
        let cmds = fx.on_frame(sample(150.0));
        assert!(cmds.contains(&DomCommand::AddClass {
            target: NAV,
            class: "shadow-lg".into()
        }));

        // No flip, no class change.
        let cmds = fx.on_frame(sample(160.0));
        assert!(!cmds.iter().any(|c| c.target() == Some(NAV)));

        let cmds = fx.on_frame(sample(100.0));
        assert!(cmds.contains(&DomCommand::RemoveClass {
            target: NAV,
            class: "shadow-lg".into()
        }));
    }

    #[test]
    fn parallax_only_within_first_screen() {
        let mut fx = effects();
        let cmds = fx.on_frame(sample(200.0));
        assert!(cmds.contains(&DomCommand::SetTranslateY {
            target: HERO,
            px: 100.0
        }));

        let cmds = fx.on_frame(sample(900.0));
        assert!(!cmds.iter().any(|c| c.target() == Some(HERO)));
    }

    #[test]
    fn missing_elements_produce_nothing() {
        let mut fx = ScrollEffects::new(ScrollConfig::default(), None, None);
        assert!(fx.on_frame(sample(500.0)).is_empty());
    }

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#about"), Some("about"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about"), None);
    }

    #[test]
    fn destination_subtracts_nav_height() {
        assert_eq!(anchor_destination(1200.0, 80.0), 1120.0);
    }
}
