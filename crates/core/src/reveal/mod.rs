//! One-shot, viewport-triggered reveals.
//!
//! Two registries are kept, one per observer:
//!
//! ```text
//!   [data-reveal] ──▶ FadeReveal  ──(ratio ≥ 0.1, bottom inset 50px)──▶ opacity 1, translateY 0
//!   section      ──▶ SkillReveal ──(ratio ≥ 0.5)──────────────────────▶ bar N width after N × 200ms
//! ```
//!
//! An element leaves its registry the moment its reveal fires, and the same
//! batch of commands unobserves it. Later intersection entries for it find
//! nothing to do, so scrolling away and back never re-triggers or resets.

pub mod fade;
pub mod skills;

pub use fade::FadeReveal;
pub use skills::{SkillBar, SkillReveal};

use folio_protocol::{DomCommand, ElementId, IntersectionEntry, ObserverKind};

use crate::config::{RevealConfig, SkillConfig};

#[derive(Debug, Clone)]
pub struct RevealController {
    fade: FadeReveal,
    skills: SkillReveal,
}

impl RevealController {
    pub fn new(reveal: RevealConfig, skills: SkillConfig) -> Self {
        Self {
            fade: FadeReveal::new(reveal),
            skills: SkillReveal::new(skills),
        }
    }

    pub fn register_fade(&mut self, target: ElementId) -> Vec<DomCommand> {
        self.fade.register(target)
    }

    pub fn register_skill_section(
        &mut self,
        section: ElementId,
        bars: &[SkillBar],
    ) -> Vec<DomCommand> {
        self.skills.register(section, bars)
    }

    /// Handle a batch from the observer of `kind`. Batches for observers this
    /// controller does not own produce nothing.
    pub fn on_intersections(
        &mut self,
        kind: ObserverKind,
        entries: &[IntersectionEntry],
    ) -> Vec<DomCommand> {
        match kind {
            ObserverKind::Reveal => self.fade.on_intersections(entries),
            ObserverKind::SkillSection => self.skills.on_intersections(entries),
            ObserverKind::LazyImage => Vec::new(),
        }
    }

    pub fn reveal_all(&mut self) -> Vec<DomCommand> {
        let mut commands = self.fade.reveal_all();
        commands.extend(self.skills.reveal_all());
        commands
    }

    pub fn fade(&self) -> &FadeReveal {
        &self.fade
    }

    pub fn skills(&self) -> &SkillReveal {
        &self.skills
    }
}
