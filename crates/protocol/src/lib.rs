pub mod commands;
pub mod types;

pub use commands::{DomCommand, LogLevel};
pub use types::{
    Easing, ElementId, IntersectionEntry, Length, LengthParseError, ObserverKind,
    ObserverOptions, RootMargin, Transition,
};
