//! Footer clock
//!
//! The player footer shows the local date and time, refreshed on a fixed
//! cadence by the host loop.

use chrono::{DateTime, Local, TimeZone};

/// Formats the footer line
#[derive(Debug, Clone)]
pub struct FooterClock {
    format: String,
    current: String,
}

/// Default timestamp format (`10/19/2026, 3:04:05 PM` style)
pub const DEFAULT_CLOCK_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

impl FooterClock {
    /// Create a clock with the default format, stamped with the current time
    pub fn new() -> Self {
        Self::with_format(DEFAULT_CLOCK_FORMAT)
    }

    /// Create a clock with a custom `strftime` format
    pub fn with_format(format: impl Into<String>) -> Self {
        let mut clock = Self {
            format: format.into(),
            current: String::new(),
        };
        clock.tick();
        clock
    }

    /// Refresh from the system clock
    pub fn tick(&mut self) -> &str {
        self.tick_at(&Local::now())
    }

    /// Refresh from a given instant
    pub fn tick_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> &str
    where
        Tz::Offset: std::fmt::Display,
    {
        self.current = now.format(&self.format).to_string();
        &self.current
    }

    /// Last formatted timestamp
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Full footer line
    pub fn footer(&self) -> String {
        format!("Current date and time is {}.", self.current)
    }
}

impl Default for FooterClock {
    fn default() -> Self {
        Self::new()
    }
}
