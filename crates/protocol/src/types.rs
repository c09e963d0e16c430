use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a page element, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which viewport observer a target is registered with.
///
/// Each kind maps to one observer instance on the host, created with its own
/// [`ObserverOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObserverKind {
    /// Fade/slide-in elements.
    Reveal,
    /// Sections holding skill progress bars.
    SkillSection,
    /// Images with a deferred source.
    LazyImage,
}

/// One notification from a viewport observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            target,
            is_intersecting,
            ratio,
        }
    }

    /// Whether this entry counts as visible for an observer with `threshold`.
    pub fn reaches(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Margins applied to the observer's root box, in CSS pixels.
///
/// Negative values shrink the root, so a target must travel further into
/// the viewport before it counts as intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Shrink only the bottom edge by `px`.
    pub fn bottom_inset(px: f64) -> Self {
        Self {
            bottom: -px,
            ..Self::default()
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthParseError {
    #[error("empty length")]
    Empty,
    #[error("unsupported unit in {0:?}")]
    Unit(String),
    #[error("invalid number in {0:?}")]
    Number(String),
}

/// A CSS length as used for progress bar widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Percent(f64),
    Px(f64),
}

impl Length {
    pub const ZERO_PERCENT: Length = Length::Percent(0.0);
}

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LengthParseError::Empty);
        }

        if let Some(n) = s.strip_suffix('%') {
            return parse_amount(n, s).map(Length::Percent);
        }
        if let Some(n) = s.strip_suffix("px") {
            return parse_amount(n, s).map(Length::Px);
        }
        // Unitless lengths are only valid for zero.
        match parse_amount(s, s) {
            Ok(0.0) => Ok(Length::Px(0.0)),
            _ => Err(LengthParseError::Unit(s.to_string())),
        }
    }
}

fn parse_amount(number: &str, whole: &str) -> Result<f64, LengthParseError> {
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| LengthParseError::Number(whole.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(LengthParseError::Number(whole.to_string()));
    }
    Ok(value)
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Percent(v) => write!(f, "{v}%"),
            Length::Px(v) => write!(f, "{v}px"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        };
        f.write_str(name)
    }
}

/// A CSS `transition` shared by several properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub properties: Vec<String>,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = f64::from(self.duration_ms) / 1000.0;
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{property} {secs}s {}", self.easing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percent_and_px() {
        assert_eq!("85%".parse::<Length>(), Ok(Length::Percent(85.0)));
        assert_eq!(" 12.5% ".parse::<Length>(), Ok(Length::Percent(12.5)));
        assert_eq!("240px".parse::<Length>(), Ok(Length::Px(240.0)));
        assert_eq!("0".parse::<Length>(), Ok(Length::Px(0.0)));
    }

    #[test]
    fn rejects_garbage_lengths() {
        assert_eq!("".parse::<Length>(), Err(LengthParseError::Empty));
        assert!(matches!("3em".parse::<Length>(), Err(LengthParseError::Unit(_))));
        assert!(matches!("abc%".parse::<Length>(), Err(LengthParseError::Number(_))));
        assert!(matches!("-5%".parse::<Length>(), Err(LengthParseError::Number(_))));
        assert!(matches!("40".parse::<Length>(), Err(LengthParseError::Unit(_))));
    }

    #[test]
    fn length_display_is_css() {
        assert_eq!(Length::Percent(40.0).to_string(), "40%");
        assert_eq!(Length::Px(12.5).to_string(), "12.5px");
        assert_eq!(Length::ZERO_PERCENT.to_string(), "0%");
    }

    #[test]
    fn root_margin_bottom_inset() {
        assert_eq!(RootMargin::bottom_inset(50.0).to_string(), "0px 0px -50px 0px");
    }

    #[test]
    fn transition_lists_every_property() {
        let t = Transition {
            properties: vec!["opacity".into(), "transform".into()],
            duration_ms: 600,
            easing: Easing::EaseOut,
        };
        assert_eq!(
            t.to_string(),
            "opacity 0.6s ease-out, transform 0.6s ease-out"
        );
    }

    #[test]
    fn entry_reaches_threshold() {
        let id = ElementId(1);
        assert!(IntersectionEntry::new(id, true, 0.1).reaches(0.1));
        assert!(!IntersectionEntry::new(id, true, 0.05).reaches(0.1));
        assert!(!IntersectionEntry::new(id, false, 1.0).reaches(0.1));
        assert!(IntersectionEntry::new(id, true, 0.0).reaches(0.0));
    }
}
