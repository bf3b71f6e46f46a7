// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! The NeTEx objects taking part in the conversion

use chrono::NaiveDate;
use geo::Coord;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use typed_index_collection::Id;

macro_rules! impl_id {
    ($ty:ty) => {
        impl Id<$ty> for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

/// A date without time zone
pub type Date = NaiveDate;

/// A demand-responsive transit offer (NeTEx `FlexibleLine`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexibleLine {
    /// NeTEx identifier
    pub id: String,
    /// Display name, also used to select offers
    pub name: String,
    /// Booking rules, in document order
    pub booking_arrangements: Vec<BookingArrangement>,
}
impl_id!(FlexibleLine);

/// A booking rule attached to a [FlexibleLine]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingArrangement {
    /// NeTEx identifier; its last segment may carry an attribute code
    pub id: String,
    /// Free text of the rule
    pub booking_note: Option<String>,
}

/// Time of day and validity days of a service (NeTEx `AvailabilityCondition`)
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityCondition {
    /// NeTEx identifier
    pub id: String,
    /// Start of the service
    pub start_time: Time,
    /// End of the service, possibly on the next day
    pub end_time: Time,
    /// One character per day of the timetable period, `1` when running
    pub valid_day_bits: String,
}
impl_id!(AvailabilityCondition);

/// The join record between a line, an availability and a journey pattern
/// (NeTEx `ServiceJourney`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceJourney {
    /// NeTEx identifier, only used for logging
    pub id: String,
    /// Reference to a [FlexibleLine]
    pub flexible_line_ref: String,
    /// Reference to an [AvailabilityCondition]
    pub availability_condition_ref: String,
    /// Reference to a [ServiceJourneyPattern]
    pub service_journey_pattern_ref: String,
}

/// A journey pattern, reduced to the stop point used to locate its area
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceJourneyPattern {
    /// NeTEx identifier
    pub id: String,
    /// First scheduled stop point of the pattern
    pub scheduled_stop_point_ref: String,
}
impl_id!(ServiceJourneyPattern);

impl ServiceJourneyPattern {
    /// The part of a pattern identifier after its last `:`
    pub fn suffix(pattern_id: &str) -> &str {
        pattern_id.rsplit(':').next().unwrap_or(pattern_id)
    }
}

/// Link between a scheduled stop point and a flexible area
/// (NeTEx `FlexibleStopAssignment`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexibleStopAssignment {
    /// Assigned scheduled stop point
    pub scheduled_stop_point_ref: String,
    /// Area served from this stop point
    pub flexible_area_ref: String,
}

/// One vertex of an area boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Text of the `gml:pos`, written back unchanged
    pub text: String,
    /// Parsed (longitude, latitude)
    pub coord: Coord<f64>,
}

/// The service area of a line (NeTEx `FlexibleArea`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexibleArea {
    /// NeTEx identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Boundary, empty when the area carries no polygon
    pub boundary: Vec<Vertex>,
}
impl_id!(FlexibleArea);

/// A real-world stop (NeTEx `StopPlace` typed as `regularStop`)
#[derive(Debug, Clone, PartialEq)]
pub struct RegularStop {
    /// Public code, used as stop number in HRDF
    pub public_code: String,
    /// Display name
    pub name: String,
    /// (longitude, latitude)
    pub coord: Coord<f64>,
}

/// Validity period of the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPeriod {
    /// First day of the timetable
    pub start_date: Date,
    /// Last day of the timetable
    pub end_date: Date,
}

/// Errors on [Time] parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    /// The string is not made of `HH:MM:SS`
    #[error("wrong time format '{0}', expected 'HH:MM:SS'")]
    WrongFormat(String),
    /// Minutes or seconds out of range
    #[error("wrong time value '{0}'")]
    WrongValue(String),
}

/// A time of day, as seconds since midnight
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl Time {
    /// Build a time from its components
    pub fn new(h: u32, m: u32, s: u32) -> Time {
        Time(h * 60 * 60 + m * 60 + s)
    }
    /// Hours part
    pub fn hours(self) -> u32 {
        self.0 / 60 / 60
    }
    /// Minutes part
    pub fn minutes(self) -> u32 {
        self.0 / 60 % 60
    }
    /// Seconds part
    pub fn seconds(self) -> u32 {
        self.0 % 60
    }
    /// Seconds since midnight
    pub fn total_seconds(self) -> u32 {
        self.0
    }
}

impl FromStr for Time {
    type Err = TimeError;
    fn from_str(time: &str) -> Result<Self, Self::Err> {
        let time = time.trim();
        let mut t = time.split(':');
        let (hours, minutes, seconds) = match (t.next(), t.next(), t.next(), t.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            (Some(h), Some(m), None, None) => (h, m, "0"),
            _ => return Err(TimeError::WrongFormat(time.to_string())),
        };
        let parse = |value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| TimeError::WrongFormat(time.to_string()))
        };
        let (hours, minutes, seconds) = (parse(hours)?, parse(minutes)?, parse(seconds)?);
        if minutes > 59 || seconds > 59 {
            return Err(TimeError::WrongValue(time.to_string()));
        }
        Ok(Time::new(hours, minutes, seconds))
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod time {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn parse_and_display() {
            let time: Time = "08:05:09".parse().unwrap();
            assert_eq!(8, time.hours());
            assert_eq!(5, time.minutes());
            assert_eq!(9, time.seconds());
            assert_eq!("08:05:09", time.to_string());
        }

        #[test]
        fn without_seconds() {
            let time: Time = "23:59".parse().unwrap();
            assert_eq!(Time::new(23, 59, 0), time);
        }

        #[test]
        fn wrong_format() {
            assert_eq!(
                Err(TimeError::WrongFormat("8h00".to_string())),
                "8h00".parse::<Time>()
            );
            assert_eq!(
                Err(TimeError::WrongFormat("08:00:00:00".to_string())),
                "08:00:00:00".parse::<Time>()
            );
        }

        #[test]
        fn wrong_value() {
            assert_eq!(
                Err(TimeError::WrongValue("08:60:00".to_string())),
                "08:60:00".parse::<Time>()
            );
        }
    }

    #[test]
    fn pattern_suffix() {
        assert_eq!(
            "SJP_1",
            ServiceJourneyPattern::suffix("ch:1:ServiceJourneyPattern:SJP_1")
        );
        assert_eq!("SJP_1", ServiceJourneyPattern::suffix("SJP_1"));
    }
}
