use std::collections::BTreeMap;

use folio_protocol::{DomCommand, ElementId, IntersectionEntry, ObserverKind};

use crate::config::LazyConfig;

/// Images whose real source is held back until they scroll into view.
#[derive(Debug, Clone)]
pub struct LazyImages {
    config: LazyConfig,
    pending: BTreeMap<ElementId, String>,
}

impl LazyImages {
    pub fn new(config: LazyConfig) -> Self {
        Self {
            config,
            pending: BTreeMap::new(),
        }
    }

    /// Observe `image` if it carries a non-empty deferred source.
    pub fn register(&mut self, image: ElementId, deferred_src: Option<&str>) -> Vec<DomCommand> {
        let Some(src) = deferred_src.map(str::trim).filter(|s| !s.is_empty()) else {
            return Vec::new();
        };
        if self.pending.contains_key(&image) {
            return Vec::new();
        }
        self.pending.insert(image, src.to_string());
        vec![DomCommand::Observe {
            observer: ObserverKind::LazyImage,
            target: image,
        }]
    }

    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        for entry in entries {
            if !entry.reaches(self.config.threshold) {
                continue;
            }
            if let Some(src) = self.pending.remove(&entry.target) {
                commands.extend(self.load(entry.target, src));
            }
        }
        commands
    }

    pub fn load_all(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .flat_map(|(image, src)| self.load(image, src))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn load(&self, target: ElementId, src: String) -> [DomCommand; 3] {
        [
            DomCommand::SetAttribute {
                target,
                name: "src".into(),
                value: src,
            },
            DomCommand::RemoveClass {
                target,
                class: self.config.pending_class.clone(),
            },
            DomCommand::Unobserve {
                observer: ObserverKind::LazyImage,
                target,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_on_first_intersection_only() {
        let mut lazy = LazyImages::new(LazyConfig::default());
        let img = ElementId(5);
        assert_eq!(lazy.register(img, Some("photo.jpg")).len(), 1);

        let entry = IntersectionEntry::new(img, true, 0.0);
        let cmds = lazy.on_intersections(&[entry]);
        assert_eq!(
            cmds[0],
            DomCommand::SetAttribute {
                target: img,
                name: "src".into(),
                value: "photo.jpg".into(),
            }
        );
        assert_eq!(
            cmds[1],
            DomCommand::RemoveClass {
                target: img,
                class: "lazy".into(),
            }
        );
        assert_eq!(
            cmds[2],
            DomCommand::Unobserve {
                observer: ObserverKind::LazyImage,
                target: img,
            }
        );

        assert!(lazy.on_intersections(&[entry]).is_empty());
    }

    #[test]
    fn skips_images_without_source() {
        let mut lazy = LazyImages::new(LazyConfig::default());
        assert!(lazy.register(ElementId(1), None).is_empty());
        assert!(lazy.register(ElementId(2), Some("  ")).is_empty());
        assert_eq!(lazy.pending(), 0);
    }

    #[test]
    fn ignores_non_intersecting_entries() {
        let mut lazy = LazyImages::new(LazyConfig::default());
        lazy.register(ElementId(1), Some("a.png"));
        assert!(
            lazy.on_intersections(&[IntersectionEntry::new(ElementId(1), false, 0.0)])
                .is_empty()
        );
        assert_eq!(lazy.pending(), 1);
    }
}
