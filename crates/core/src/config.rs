//! Tuning constants and the page-level configuration.
//!
//! Every number that shapes the reveal policy lives here as a named constant
//! and as a field of [`FolioConfig`] defaulting to it. A page can override any
//! subset of fields with a JSON document (see [`FolioConfig::from_json`]).

use folio_protocol::{DomCommand, Easing, ObserverOptions, RootMargin, Transition};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Visible fraction at which a fade-in element is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Bottom root-margin inset for the reveal observer, in pixels.
pub const REVEAL_BOTTOM_INSET_PX: f64 = 50.0;
/// Initial downward offset of a fade-in element, in pixels.
pub const REVEAL_OFFSET_PX: f64 = 20.0;
pub const REVEAL_TRANSITION_MS: u32 = 600;

/// Visible fraction at which a skill section starts filling its bars.
pub const SKILL_THRESHOLD: f64 = 0.5;
/// Delay between consecutive bars in a section.
pub const SKILL_STAGGER_MS: u32 = 200;
pub const SKILL_WIDTH_ATTRIBUTE: &str = "data-width";

pub const LAZY_THRESHOLD: f64 = 0.0;
pub const LAZY_CLASS: &str = "lazy";

/// Height reserved for the fixed navigation bar when scrolling to an anchor.
pub const ANCHOR_OFFSET_PX: f64 = 80.0;
pub const NAV_SHADOW_AFTER_PX: f64 = 100.0;
pub const NAV_SHADOW_CLASS: &str = "shadow-lg";
pub const PARALLAX_FACTOR: f64 = 0.5;

pub const MENU_HIDDEN_CLASS: &str = "hidden";
pub const MENU_ICON_CLOSED_CLASS: &str = "fa-bars";
pub const MENU_ICON_OPEN_CLASS: &str = "fa-times";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub reveal: RevealConfig,
    pub skills: SkillConfig,
    pub lazy: LazyConfig,
    pub scroll: ScrollConfig,
    pub menu: MenuConfig,
    pub selectors: Selectors,
    /// Stylesheets to hint with `<link rel="preload" as="style">`.
    pub preload_styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub bottom_inset_px: f64,
    pub offset_px: f64,
    pub transition_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_inset_px: REVEAL_BOTTOM_INSET_PX,
            offset_px: REVEAL_OFFSET_PX,
            transition_ms: REVEAL_TRANSITION_MS,
        }
    }
}

impl RevealConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: RootMargin::bottom_inset(self.bottom_inset_px),
        }
    }

    pub fn transition(&self) -> Transition {
        Transition {
            properties: vec!["opacity".into(), "transform".into()],
            duration_ms: self.transition_ms,
            easing: Easing::EaseOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub threshold: f64,
    pub stagger_ms: u32,
    /// Attribute the captured target width is stored under.
    pub width_attribute: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            threshold: SKILL_THRESHOLD,
            stagger_ms: SKILL_STAGGER_MS,
            width_attribute: SKILL_WIDTH_ATTRIBUTE.into(),
        }
    }
}

impl SkillConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: RootMargin::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub threshold: f64,
    pub source_attribute: String,
    /// Class removed from an image once its source is live.
    pub pending_class: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            threshold: LAZY_THRESHOLD,
            source_attribute: "data-src".into(),
            pending_class: LAZY_CLASS.into(),
        }
    }
}

impl LazyConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: RootMargin::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_offset_px: f64,
    pub shadow_after_px: f64,
    pub shadow_class: String,
    pub parallax_factor: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_offset_px: ANCHOR_OFFSET_PX,
            shadow_after_px: NAV_SHADOW_AFTER_PX,
            shadow_class: NAV_SHADOW_CLASS.into(),
            parallax_factor: PARALLAX_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub hidden_class: String,
    pub icon_closed_class: String,
    pub icon_open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hidden_class: MENU_HIDDEN_CLASS.into(),
            icon_closed_class: MENU_ICON_CLOSED_CLASS.into(),
            icon_open_class: MENU_ICON_OPEN_CLASS.into(),
        }
    }
}

/// CSS selectors the host uses to find the page structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub reveal: String,
    pub skill_section: String,
    pub skill_progress: String,
    pub lazy_image: String,
    pub menu_trigger: String,
    pub menu: String,
    /// Looked up inside the menu trigger.
    pub menu_icon: String,
    pub anchor: String,
    pub nav: String,
    pub hero: String,
    pub contact_section: String,
    /// Looked up inside the contact section.
    pub contact_link: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            reveal: "[data-reveal]".into(),
            skill_section: "[data-skill-section]".into(),
            skill_progress: "[data-skill-progress]".into(),
            lazy_image: "img[data-src]".into(),
            menu_trigger: "#mobile-menu-btn".into(),
            menu: "#mobile-menu".into(),
            menu_icon: "i".into(),
            anchor: "a[href^=\"#\"]".into(),
            nav: "nav".into(),
            hero: "[data-parallax]".into(),
            contact_section: "#contacto".into(),
            contact_link: "a[href^=\"mailto:\"], a[href^=\"tel:\"]".into(),
        }
    }
}

impl Selectors {
    fn named(&self) -> [(&'static str, &str); 12] {
        [
            ("reveal", &self.reveal),
            ("skill_section", &self.skill_section),
            ("skill_progress", &self.skill_progress),
            ("lazy_image", &self.lazy_image),
            ("menu_trigger", &self.menu_trigger),
            ("menu", &self.menu),
            ("menu_icon", &self.menu_icon),
            ("anchor", &self.anchor),
            ("nav", &self.nav),
            ("hero", &self.hero),
            ("contact_section", &self.contact_section),
            ("contact_link", &self.contact_link),
        ]
    }
}

impl FolioConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for a page from its optional override text.
    ///
    /// A missing override yields the defaults silently. A broken one yields
    /// the defaults plus a warning for the host to log, so the page still
    /// boots.
    pub fn from_page(json: Option<&str>) -> (Self, Option<DomCommand>) {
        let Some(json) = json else {
            return (Self::default(), None);
        };
        match Self::from_json(json) {
            Ok(config) => (config, None),
            Err(err) => (
                Self::default(),
                Some(DomCommand::warn(format!(
                    "ignoring page config ({err}), using defaults"
                ))),
            ),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("reveal.threshold", self.reveal.threshold),
            ("skills.threshold", self.skills.threshold),
            ("lazy.threshold", self.lazy.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Threshold { name, value });
            }
        }

        if let Some((name, _)) = self
            .selectors
            .named()
            .into_iter()
            .find(|(_, sel)| sel.trim().is_empty())
        {
            return Err(ConfigError::Selector { name });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = FolioConfig::default();
        assert_eq!(config.reveal.threshold, REVEAL_THRESHOLD);
        assert_eq!(config.skills.threshold, SKILL_THRESHOLD);
        assert_eq!(config.skills.stagger_ms, SKILL_STAGGER_MS);
        assert_eq!(config.scroll.anchor_offset_px, ANCHOR_OFFSET_PX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reveal_observer_uses_bottom_inset() {
        let options = RevealConfig::default().observer_options();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin.to_string(), "0px 0px -50px 0px");
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = FolioConfig::from_json(r#"{"skills": {"stagger_ms": 150}}"#)
            .expect("partial override should parse");
        assert_eq!(config.skills.stagger_ms, 150);
        assert_eq!(config.skills.threshold, SKILL_THRESHOLD);
        assert_eq!(config.reveal, RevealConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        let config = FolioConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = FolioConfig::from_json(r#"{"reveal": {"threshold": 1.5}}"#);
        assert!(matches!(
            err,
            Err(ConfigError::Threshold {
                name: "reveal.threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_blank_selector() {
        let err = FolioConfig::from_json(r#"{"selectors": {"nav": "  "}}"#);
        assert!(matches!(err, Err(ConfigError::Selector { name: "nav" })));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            FolioConfig::from_json("{reveal"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn contact_section_matches_page_markup() {
        assert_eq!(FolioConfig::default().selectors.contact_section, "#contacto");
    }

    #[test]
    fn page_without_override_uses_defaults_quietly() {
        let (config, warning) = FolioConfig::from_page(None);
        assert_eq!(config, FolioConfig::default());
        assert_eq!(warning, None);
    }

    #[test]
    fn page_override_is_applied() {
        let (config, warning) =
            FolioConfig::from_page(Some(r#"{"scroll": {"anchor_offset_px": 64}}"#));
        assert_eq!(config.scroll.anchor_offset_px, 64.0);
        assert_eq!(warning, None);
    }

    #[test]
    fn malformed_page_override_falls_back_with_one_warning() {
        let (config, warning) = FolioConfig::from_page(Some("{reveal"));
        assert_eq!(config, FolioConfig::default());
        let Some(DomCommand::Log { level, message }) = warning.as_ref() else {
            panic!("expected a warning, got {warning:?}");
        };
        assert_eq!(*level, folio_protocol::LogLevel::Warn);
        assert!(message.starts_with("ignoring page config (config json:"));
    }

    #[test]
    fn out_of_range_page_override_falls_back_with_one_warning() {
        let (config, warning) =
            FolioConfig::from_page(Some(r#"{"skills": {"threshold": 2}}"#));
        assert_eq!(config, FolioConfig::default());
        assert_eq!(
            warning,
            Some(DomCommand::warn(
                "ignoring page config (skills.threshold must be within 0..=1, got 2), using defaults"
            ))
        );
    }
}
