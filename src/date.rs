//! Date string parsing and the leap year rule
//!
//! Both parsers delegate the grammar to chrono and convert the result to
//! UTC: the instant is preserved, the offset notation of the input is not.
//! Failures wrap chrono's diagnosis together with the offending text.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// Ways in which a date string taken from user input can be wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// text does not conform to RFC 2822
    Rfc2822 { text: String, source: chrono::ParseError },
    /// text does not conform to ISO 8601 (RFC 3339 profile)
    Iso8601 { text: String, source: chrono::ParseError },
}

/// Parse an RFC 2822 date/time string (`"Tue, 1 Jul 2003 10:52:37 +0200"`)
/// into a UTC instant
pub fn parse_rfc2822(text: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc2822(text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| ParseError::Rfc2822 { text: text.to_string(), source })
}

/// Parse an ISO 8601 date/time string (`"2003-07-01T10:52:37+02:00"`)
/// into a UTC instant
///
/// Accepts the extended format with a `Z` or `±hh:mm` offset (the RFC 3339
/// profile of ISO 8601); the basic format without separators is not
/// supported.
pub fn parse_iso8601(text: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| ParseError::Iso8601 { text: text.to_string(), source })
}

/// Whether the UTC year of `date` is a Gregorian leap year
pub fn is_leap_year(date: DateTime<Utc>) -> bool {
    is_leap(date.year())
}

fn is_leap(year: i32) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError::*;
        match self {
            Rfc2822 { text, source } => {
                write!(f, "'{}' is not an RFC 2822 date: {}", text, source)
            }
            Iso8601 { text, source } => {
                write!(f, "'{}' is not an ISO 8601 date: {}", text, source)
            }
        }
    }
}

impl ParseError {
    /// What message to show to help fix the malformed string
    pub fn fix_hint(&self) -> String {
        use ParseError::*;
        match self {
            Rfc2822 { .. } => {
                "expected something like 'Tue, 1 Jul 2003 10:52:37 +0200'".to_string()
            }
            Iso8601 { .. } => {
                "expected something like '2003-07-01T10:52:37+02:00' or a 'Z' suffix".to_string()
            }
        }
    }
}
