pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lazy;
pub mod menu;
pub mod page;
pub mod reveal;
pub mod scroll;

pub use config::FolioConfig;
pub use error::ConfigError;
pub use menu::ClickOrigin;
pub use page::{LazyImage, MenuLayout, PageContext, PageLayout, PageStatus, SkillSection};
pub use reveal::SkillBar;
pub use scroll::ScrollSample;
