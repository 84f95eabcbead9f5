//! Angle between the hands of an analog clock
//!
//! The hour hand moves 0.5 degrees per minute of the day, the minute hand
//! 6 degrees per minute, so the displayed time alone determines the angle.

use chrono::{DateTime, Timelike, Utc};
use std::f64::consts::PI;

/// Angle in radians between the hour and minute hands at the UTC time of
/// `date`
///
/// Always the shorter of the two arcs, so the result is in `0.0 ..= PI`.
pub fn angle_between_hands(date: DateTime<Utc>) -> f64 {
    let mut hour = date.hour();
    if hour >= 12 {
        hour -= 12;
    }
    let minute = date.minute();
    let degrees = (f64::from(hour * 60 + minute) / 2.0 - 6.0 * f64::from(minute)).abs();
    let degrees = if degrees > 180.0 { 360.0 - degrees } else { degrees };
    // rounding in the degree conversion must not push past the half turn
    degrees.to_radians().min(PI)
}
