//! Console-only diagnostics: contact link clicks and page load timing.

use folio_protocol::DomCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactScheme {
    Mail,
    Tel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink<'a> {
    pub scheme: ContactScheme,
    pub href: &'a str,
}

impl<'a> ContactLink<'a> {
    pub fn parse(href: &'a str) -> Option<Self> {
        let href = href.trim();
        let (prefix, _) = href.split_once(':')?;
        let scheme = if prefix.eq_ignore_ascii_case("mailto") {
            ContactScheme::Mail
        } else if prefix.eq_ignore_ascii_case("tel") {
            ContactScheme::Tel
        } else {
            return None;
        };
        Some(Self { scheme, href })
    }

    pub fn log(&self) -> DomCommand {
        DomCommand::info(format!("Contact attempt: {}", self.href))
    }
}

/// `loadEventStart` / `loadEventEnd` of the navigation timing entry, in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadTiming {
    pub load_event_start: f64,
    pub load_event_end: f64,
}

impl LoadTiming {
    pub fn duration_ms(&self) -> f64 {
        (self.load_event_end - self.load_event_start).max(0.0)
    }

    pub fn log(&self) -> DomCommand {
        DomCommand::info(format!("Page Load Time: {:.1} ms", self.duration_ms()))
    }
}
