//! Pluggable date formatting and parsing.
//!
//! Dates cross the wire as text in both directions: search strings are parsed
//! into instants before they become predicates, and date cells are formatted
//! before they land in the response. Both directions go through the same
//! [`DateFormatter`] so that what the widget shows is what it can search for.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Formats and parses dates for one table.
pub trait DateFormatter: Send + Sync {
    /// Renders a date for a response cell.
    fn format(&self, date: &DateTime<Utc>) -> String;

    /// Parses a search token. `None` means the token is not a date, and the
    /// predicate that needed it is skipped.
    fn parse(&self, input: &str) -> Option<DateTime<Utc>>;
}

/// [`DateFormatter`] backed by a `chrono` strftime pattern.
///
/// Patterns without a time component parse to midnight UTC.
///
/// ```
/// use gridserve::{DateFormatter, PatternFormatter};
///
/// let formatter = PatternFormatter::new("%d/%m/%Y");
/// let date = formatter.parse("24/12/2023").unwrap();
/// assert_eq!(formatter.format(&date), "24/12/2023");
/// assert!(formatter.parse("2023-12-24").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
}

impl PatternFormatter {
    /// The pattern used by [`PatternFormatter::default`].
    pub const DEFAULT_PATTERN: &'static str = "%Y-%m-%d";

    /// Creates a formatter for the given strftime pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        PatternFormatter {
            pattern: pattern.into(),
        }
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        PatternFormatter::new(Self::DEFAULT_PATTERN)
    }
}

impl DateFormatter for PatternFormatter {
    fn format(&self, date: &DateTime<Utc>) -> String {
        date.format(&self.pattern).to_string()
    }

    fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        if let Ok(date) = DateTime::parse_from_str(input, &self.pattern) {
            return Some(date.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, &self.pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(input, &self.pattern)
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}
