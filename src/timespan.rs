//! Millisecond-precise timespans and their `HH:mm:ss.sss` rendering
//!
//! A [`Timespan`] is the non-negative gap between two instants, stored as a
//! whole number of milliseconds. `Display` renders it as `HH:mm:ss.sss`
//! (hours grow past two digits when needed) and `FromStr` parses that same
//! layout back, so formatting then re-parsing recovers the millisecond count.

#![allow(clippy::upper_case_acronyms)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pest::Parser;
use pest_derive::*;

const MILLIS_PER_HOUR: u64 = 3_600_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_SECOND: u64 = 1_000;

/// A non-negative duration with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timespan {
    millis: u64,
}

/// Ways in which a timespan can fail to be constructed or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimespanError {
    /// `end` is strictly before `start`
    EndBeforeStart,
    /// text does not have the `HH:mm:ss.sss` shape
    BadLayout(String),
    /// hours field is more than a timespan can hold in milliseconds
    HoursOutOfRange(String),
    /// minutes field is 60 or more
    MinutesOutOfRange(u64),
    /// seconds field is 60 or more
    SecondsOutOfRange(u64),
}

/// Render the gap between two instants as `HH:mm:ss.sss`
///
/// Hours are zero-padded to 2 digits and unbounded past 99; minutes and
/// seconds are 2 digits, milliseconds 3 digits. A negative gap is rejected
/// with [`TimespanError::EndBeforeStart`].
pub fn format_timespan(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<String, TimespanError> {
    Ok(Timespan::between(start, end)?.to_string())
}

impl Timespan {
    /// The gap from `start` to `end`, truncated to whole milliseconds
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimespanError> {
        let millis = (end - start).num_milliseconds();
        if millis < 0 {
            Err(TimespanError::EndBeforeStart)
        } else {
            Ok(Self { millis: millis as u64 })
        }
    }

    /// A span of exactly `millis` milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// `self.millis` accessor
    pub fn millis(self) -> u64 {
        self.millis
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // each remainder cascades to the next unit
        let hours = self.millis / MILLIS_PER_HOUR;
        let rest = self.millis % MILLIS_PER_HOUR;
        let minutes = rest / MILLIS_PER_MINUTE;
        let rest = rest % MILLIS_PER_MINUTE;
        let seconds = rest / MILLIS_PER_SECOND;
        let millis = rest % MILLIS_PER_SECOND;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

#[derive(Parser)]
#[grammar = "timespan.pest"]
struct TimespanParser;

// fixed-width pair to u64 contents
macro_rules! parse_u64 {
    ( $node:expr ) => {
        // safe to .unwrap() because the grammar bounds these fields
        // to 2 or 3 digits
        $node.as_str().parse::<u64>().unwrap()
    };
}

impl FromStr for Timespan {
    type Err = TimespanError;

    fn from_str(s: &str) -> Result<Self, TimespanError> {
        let mut contents = match TimespanParser::parse(Rule::timespan, s) {
            Ok(contents) => contents,
            Err(e) => return Err(TimespanError::BadLayout(e.to_string())),
        };
        let mut fields = contents.next().unwrap().into_inner();
        // the grammar leaves the hours field unbounded, so it may exceed u64
        let hours = fields.next().unwrap();
        let hours = match hours.as_str().parse::<u64>() {
            Ok(hours) => hours,
            Err(_) => return Err(TimespanError::HoursOutOfRange(hours.as_str().to_string())),
        };
        let minutes = parse_u64!(fields.next().unwrap());
        let seconds = parse_u64!(fields.next().unwrap());
        let millis = parse_u64!(fields.next().unwrap());
        if minutes >= 60 {
            Err(TimespanError::MinutesOutOfRange(minutes))
        } else if seconds >= 60 {
            Err(TimespanError::SecondsOutOfRange(seconds))
        } else {
            hours
                .checked_mul(MILLIS_PER_HOUR)
                .and_then(|total| {
                    total.checked_add(
                        minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis,
                    )
                })
                .map(Self::from_millis)
                .ok_or_else(|| TimespanError::HoursOutOfRange(hours.to_string()))
        }
    }
}

impl fmt::Display for TimespanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TimespanError::*;
        match self {
            EndBeforeStart => write!(f, "end of timespan is before its start"),
            BadLayout(e) => write!(f, "text does not match the HH:mm:ss.sss layout: {}", e),
            HoursOutOfRange(h) => write!(f, "{} hours is more than a timespan can hold", h),
            MinutesOutOfRange(m) => write!(f, "{} is not a valid minutes field", m),
            SecondsOutOfRange(s) => write!(f, "{} is not a valid seconds field", s),
        }
    }
}

impl TimespanError {
    /// What message to show to help fix the timespan error
    pub fn fix_hint(&self) -> String {
        use TimespanError::*;
        match self {
            EndBeforeStart => "swap the two instants".to_string(),
            BadLayout(_) => "expected something like '05:20:10.453'".to_string(),
            HoursOutOfRange(_) => {
                format!("hours should be at most {}", u64::MAX / MILLIS_PER_HOUR)
            }
            MinutesOutOfRange(_) | SecondsOutOfRange(_) => {
                "minutes and seconds should be in the range 0 ..= 59".to_string()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 5, h, m, s).unwrap()
    }

    macro_rules! fmt {
        ( $start:expr, $end:expr => $res:expr ) => {
            assert_eq!(format_timespan($start, $end).as_deref(), Ok($res));
        }
    }

    #[test]
    fn reference_spans() {
        fmt!(at(10, 0, 0), at(11, 0, 0) => "01:00:00.000");
        fmt!(at(10, 0, 0), at(10, 30, 0) => "00:30:00.000");
        fmt!(at(10, 0, 0), at(10, 0, 20) => "00:00:20.000");
        fmt!(at(10, 0, 0), at(10, 0, 0) + Duration::milliseconds(250) => "00:00:00.250");
        fmt!(at(10, 0, 0), at(15, 20, 10) + Duration::milliseconds(453) => "05:20:10.453");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(
            Timespan::from_millis(100 * 3_600_000 + 5 * 60_000 + 7_001).to_string(),
            "100:05:07.001",
        );
        assert_eq!(Timespan::from_millis(99 * 3_600_000).to_string(), "99:00:00.000");
    }

    #[test]
    fn negative_span_rejected() {
        assert_eq!(
            format_timespan(at(11, 0, 0), at(10, 0, 0)),
            Err(TimespanError::EndBeforeStart),
        );
        // the empty span is fine
        fmt!(at(10, 0, 0), at(10, 0, 0) => "00:00:00.000");
    }

    macro_rules! rt {
        ( $s:expr => $ms:expr ) => {{
            assert_eq!($s.parse::<Timespan>(), Ok(Timespan::from_millis($ms)));
            assert_eq!(&Timespan::from_millis($ms).to_string(), $s);
        }}
    }

    #[test]
    fn round_trip() {
        rt!("05:20:10.453" => 19_210_453);
        rt!("00:00:00.000" => 0);
        rt!("00:00:00.001" => 1);
        rt!("01:00:00.000" => 3_600_000);
        rt!("23:59:59.999" => 86_399_999);
        rt!("100:00:00.000" => 360_000_000);
    }

    #[test]
    fn parse_format_parse() {
        for ms in [0, 1, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 987_654_321, u64::MAX] {
            let span = Timespan::from_millis(ms);
            assert_eq!(span.to_string().parse::<Timespan>(), Ok(span));
        }
    }

    #[test]
    fn bad_layouts() {
        for s in ["", "5:20:10.453", "05:20:10", "05:20:10.45", "05-20-10.453", "05:20:10.4533"] {
            match s.parse::<Timespan>() {
                Err(TimespanError::BadLayout(_)) => (),
                other => panic!("'{}' should not parse, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn huge_hours_rejected() {
        // does not fit in u64 at all
        assert_eq!(
            "99999999999999999999:00:00.000".parse::<Timespan>(),
            Err(TimespanError::HoursOutOfRange("99999999999999999999".to_string())),
        );
        // fits in u64 but overflows the millisecond total
        assert_eq!(
            "99999999999999:00:00.000".parse::<Timespan>(),
            Err(TimespanError::HoursOutOfRange("99999999999999".to_string())),
        );
    }

    #[test]
    fn fields_out_of_range() {
        assert_eq!(
            "00:61:00.000".parse::<Timespan>(),
            Err(TimespanError::MinutesOutOfRange(61)),
        );
        assert_eq!(
            "00:00:60.000".parse::<Timespan>(),
            Err(TimespanError::SecondsOutOfRange(60)),
        );
    }
}
