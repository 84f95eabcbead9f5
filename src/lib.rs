//! Small pure date/time utilities
//!
//! Five independent operations, each stateless and safe to call from
//! any number of threads:
//!
//! - [`parse_rfc2822`] and [`parse_iso8601`] turn standards-compliant
//!   date strings into UTC instants
//! - [`is_leap_year`] checks the Gregorian leap rule on an instant's year
//! - [`format_timespan`] renders the gap between two instants as
//!   `HH:mm:ss.sss` (see also [`Timespan`], which parses the same layout back)
//! - [`angle_between_hands`] computes the angle between analog clock hands
//!   at a given time, in radians
//!
//! Instants are `chrono::DateTime<Utc>`; all component extraction is in UTC.

pub mod clock;
pub mod date;
pub mod timespan;

pub use clock::angle_between_hands;
pub use date::{is_leap_year, parse_iso8601, parse_rfc2822, ParseError};
pub use timespan::{format_timespan, Timespan, TimespanError};
