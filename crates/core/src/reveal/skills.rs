use std::collections::BTreeMap;

use folio_protocol::{DomCommand, ElementId, IntersectionEntry, Length, ObserverKind};

use crate::config::SkillConfig;

/// A progress bar as found in the document, before any capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBar {
    pub id: ElementId,
    /// Inline `style.width`, empty when unset.
    pub inline_width: Option<String>,
    /// Previously stored width attribute.
    pub stored_width: Option<String>,
}

impl SkillBar {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            inline_width: None,
            stored_width: None,
        }
    }

    pub fn with_inline_width(mut self, width: impl Into<String>) -> Self {
        self.inline_width = Some(width.into());
        self
    }

    pub fn with_stored_width(mut self, width: impl Into<String>) -> Self {
        self.stored_width = Some(width.into());
        self
    }

    /// The width this bar should fill to. Inline style wins over the stored
    /// attribute; anything unparseable counts as absent.
    pub fn target_width(&self) -> Option<Length> {
        let parse = |w: &Option<String>| w.as_deref().and_then(|w| w.parse::<Length>().ok());
        parse(&self.inline_width).or_else(|| parse(&self.stored_width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CapturedBar {
    id: ElementId,
    /// Position among all progress bars of the section.
    index: u32,
    width: Length,
}

/// Staggered fill of skill bars, triggered per section.
#[derive(Debug, Clone)]
pub struct SkillReveal {
    config: SkillConfig,
    pending: BTreeMap<ElementId, Vec<CapturedBar>>,
}

impl SkillReveal {
    pub fn new(config: SkillConfig) -> Self {
        Self {
            config,
            pending: BTreeMap::new(),
        }
    }

    /// Capture every bar's target width, collapse the bars to 0% and observe
    /// the section.
    ///
    /// Bars without a usable width are left untouched. A section with no
    /// usable bar is not observed at all.
    pub fn register(&mut self, section: ElementId, bars: &[SkillBar]) -> Vec<DomCommand> {
        if self.pending.contains_key(&section) {
            return Vec::new();
        }

        let captured: Vec<CapturedBar> = bars
            .iter()
            .zip(0u32..)
            .filter_map(|(bar, index)| {
                bar.target_width().map(|width| CapturedBar {
                    id: bar.id,
                    index,
                    width,
                })
            })
            .collect();
        if captured.is_empty() {
            return Vec::new();
        }

        let mut commands = Vec::with_capacity(captured.len() * 2 + 1);
        for bar in &captured {
            commands.push(DomCommand::SetAttribute {
                target: bar.id,
                name: self.config.width_attribute.clone(),
                value: bar.width.to_string(),
            });
            commands.push(DomCommand::SetWidth {
                target: bar.id,
                width: Length::ZERO_PERCENT,
            });
        }
        commands.push(DomCommand::Observe {
            observer: ObserverKind::SkillSection,
            target: section,
        });

        self.pending.insert(section, captured);
        commands
    }

    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        for entry in entries {
            if !entry.reaches(self.config.threshold) {
                continue;
            }
            if let Some(bars) = self.pending.remove(&entry.target) {
                commands.extend(self.fill(entry.target, &bars));
            }
        }
        commands
    }

    pub fn reveal_all(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .flat_map(|(section, bars)| self.fill(section, &bars))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, section: ElementId) -> bool {
        self.pending.contains_key(&section)
    }

    fn fill(&self, section: ElementId, bars: &[CapturedBar]) -> Vec<DomCommand> {
        let mut commands: Vec<DomCommand> = bars
            .iter()
            .map(|bar| {
                DomCommand::after(
                    bar.index.saturating_mul(self.config.stagger_ms),
                    DomCommand::SetWidth {
                        target: bar.id,
                        width: bar.width,
                    },
                )
            })
            .collect();
        commands.push(DomCommand::Unobserve {
            observer: ObserverKind::SkillSection,
            target: section,
        });
        commands
    }
}
