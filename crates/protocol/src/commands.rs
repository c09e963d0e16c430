use serde::{Deserialize, Serialize};

use crate::types::{ElementId, Length, ObserverKind, Transition};

/// A single, stateless DOM instruction.
///
/// The core emits a `Vec<DomCommand>` for every event it handles. Hosts
/// execute the list sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    /// Set inline `opacity`.
    SetOpacity { target: ElementId, opacity: f64 },

    /// Set inline `transform: translateY(<px>px)`.
    SetTranslateY { target: ElementId, px: f64 },

    /// Set inline `transition`.
    SetTransition {
        target: ElementId,
        transition: Transition,
    },

    /// Set inline `width`.
    SetWidth { target: ElementId, width: Length },

    AddClass { target: ElementId, class: String },

    RemoveClass { target: ElementId, class: String },

    SetAttribute {
        target: ElementId,
        name: String,
        value: String,
    },

    /// Start watching `target` with the observer of the given kind.
    Observe {
        observer: ObserverKind,
        target: ElementId,
    },

    /// Stop watching `target`. Unknown targets are ignored.
    Unobserve {
        observer: ObserverKind,
        target: ElementId,
    },

    /// Scroll the window so that its top edge lands at `top`.
    ScrollTo { top: f64, smooth: bool },

    /// Append `<link rel="preload" as="{kind}" href="{href}">` to the head.
    Preload { href: String, kind: String },

    /// Emit a diagnostic line on the host console.
    Log { level: LogLevel, message: String },

    /// Run `command` after `delay_ms` milliseconds.
    Defer {
        delay_ms: u32,
        command: Box<DomCommand>,
    },
}

impl DomCommand {
    /// Wrap `command` in a `Defer` unless the delay is zero.
    pub fn after(delay_ms: u32, command: DomCommand) -> Self {
        if delay_ms == 0 {
            command
        } else {
            DomCommand::Defer {
                delay_ms,
                command: Box::new(command),
            }
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        DomCommand::Log {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        DomCommand::Log {
            level: LogLevel::Warn,
            message: message.into(),
        }
    }

    /// The element this command mutates, if any.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::SetOpacity { target, .. }
            | Self::SetTranslateY { target, .. }
            | Self::SetTransition { target, .. }
            | Self::SetWidth { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::Observe { target, .. }
            | Self::Unobserve { target, .. } => Some(*target),
            Self::Defer { command, .. } => command.target(),
            Self::ScrollTo { .. } | Self::Preload { .. } | Self::Log { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_zero_is_immediate() {
        let cmd = DomCommand::after(
            0,
            DomCommand::SetOpacity {
                target: ElementId(1),
                opacity: 1.0,
            },
        );
        assert!(matches!(cmd, DomCommand::SetOpacity { .. }));
    }

    #[test]
    fn after_nonzero_defers() {
        let cmd = DomCommand::after(
            200,
            DomCommand::SetWidth {
                target: ElementId(4),
                width: Length::Percent(70.0),
            },
        );
        match cmd {
            DomCommand::Defer { delay_ms, command } => {
                assert_eq!(delay_ms, 200);
                assert_eq!(command.target(), Some(ElementId(4)));
            }
            other => panic!("expected Defer, got {other:?}"),
        }
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let cmd = DomCommand::Unobserve {
            observer: ObserverKind::LazyImage,
            target: ElementId(7),
        };
        let json = serde_json::to_string(&cmd).expect("command should serialize");
        assert_eq!(json, r#"{"Unobserve":{"observer":"LazyImage","target":7}}"#);
    }
}
