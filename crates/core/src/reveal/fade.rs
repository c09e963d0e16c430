use std::collections::BTreeSet;

use folio_protocol::{DomCommand, ElementId, IntersectionEntry, ObserverKind};

use crate::config::RevealConfig;

/// Fade/slide-in reveal for individually tagged elements.
#[derive(Debug, Clone)]
pub struct FadeReveal {
    config: RevealConfig,
    pending: BTreeSet<ElementId>,
}

impl FadeReveal {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            pending: BTreeSet::new(),
        }
    }

    /// Hide `target` below its resting position and start observing it.
    ///
    /// Registering an element that is already pending does nothing.
    pub fn register(&mut self, target: ElementId) -> Vec<DomCommand> {
        if !self.pending.insert(target) {
            return Vec::new();
        }
        vec![
            DomCommand::SetOpacity {
                target,
                opacity: 0.0,
            },
            DomCommand::SetTranslateY {
                target,
                px: self.config.offset_px,
            },
            DomCommand::SetTransition {
                target,
                transition: self.config.transition(),
            },
            DomCommand::Observe {
                observer: ObserverKind::Reveal,
                target,
            },
        ]
    }

    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        for entry in entries {
            if entry.reaches(self.config.threshold) && self.pending.remove(&entry.target) {
                commands.extend(Self::reveal(entry.target));
            }
        }
        commands
    }

    /// Reveal everything still pending, regardless of visibility.
    pub fn reveal_all(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .flat_map(Self::reveal)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, target: ElementId) -> bool {
        self.pending.contains(&target)
    }

    fn reveal(target: ElementId) -> [DomCommand; 3] {
        [
            DomCommand::SetOpacity {
                target,
                opacity: 1.0,
            },
            DomCommand::SetTranslateY { target, px: 0.0 },
            DomCommand::Unobserve {
                observer: ObserverKind::Reveal,
                target,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> FadeReveal {
        FadeReveal::new(RevealConfig::default())
    }

    #[test]
    fn register_hides_and_observes() {
        let mut f = fade();
        let cmds = f.register(ElementId(3));
        assert_eq!(cmds.len(), 4);
        assert_eq!(
            cmds[0],
            DomCommand::SetOpacity {
                target: ElementId(3),
                opacity: 0.0
            }
        );
        assert_eq!(
            cmds[1],
            DomCommand::SetTranslateY {
                target: ElementId(3),
                px: 20.0
            }
        );
        match &cmds[2] {
            DomCommand::SetTransition { transition, .. } => assert_eq!(
                transition.to_string(),
                "opacity 0.6s ease-out, transform 0.6s ease-out"
            ),
            other => panic!("expected SetTransition, got {other:?}"),
        }
        assert!(f.is_pending(ElementId(3)));
    }

    #[test]
    fn double_register_is_noop() {
        let mut f = fade();
        f.register(ElementId(1));
        assert!(f.register(ElementId(1)).is_empty());
        assert_eq!(f.pending(), 1);
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let mut f = fade();
        f.register(ElementId(1));
        let cmds = f.on_intersections(&[IntersectionEntry::new(ElementId(1), true, 0.05)]);
        assert!(cmds.is_empty());
        assert!(f.is_pending(ElementId(1)));
    }

    #[test]
    fn reveals_once_and_unobserves() {
        let mut f = fade();
        f.register(ElementId(1));
        let entry = IntersectionEntry::new(ElementId(1), true, 0.3);

        let cmds = f.on_intersections(&[entry]);
        assert!(cmds.contains(&DomCommand::SetOpacity {
            target: ElementId(1),
            opacity: 1.0
        }));
        assert!(cmds.contains(&DomCommand::Unobserve {
            observer: ObserverKind::Reveal,
            target: ElementId(1)
        }));

        assert!(f.on_intersections(&[entry]).is_empty());
        assert_eq!(f.pending(), 0);
    }

    #[test]
    fn batch_is_handled_per_entry() {
        let mut f = fade();
        for id in 0..3 {
            f.register(ElementId(id));
        }
        let cmds = f.on_intersections(&[
            IntersectionEntry::new(ElementId(0), true, 0.5),
            IntersectionEntry::new(ElementId(1), false, 0.0),
            IntersectionEntry::new(ElementId(2), true, 1.0),
            IntersectionEntry::new(ElementId(9), true, 1.0),
        ]);
        assert_eq!(cmds.len(), 6);
        assert!(f.is_pending(ElementId(1)));
        assert!(f.on_intersections(&[]).is_empty());
    }

    #[test]
    fn reveal_all_drains() {
        let mut f = fade();
        f.register(ElementId(0));
        f.register(ElementId(1));
        assert_eq!(f.reveal_all().len(), 6);
        assert_eq!(f.pending(), 0);
    }
}
