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

//! Rendering of values in the positional HRDF records

use crate::objects::{Date, Time};
use crate::Result;
use anyhow::bail;
use chrono::Datelike;
use std::fmt::Display;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Left-pad the textual form of `value` with `0` up to `length` characters.
/// Longer values are kept whole.
pub fn prefix_with_zeros<T: Display>(value: T, length: usize) -> String {
    format!("{:0>width$}", value.to_string(), width = length)
}

/// Whole minutes from `from` to `to`, `to` being on the next day when it
/// is before `from`
pub fn time_difference_in_minutes(from: Time, to: Time) -> u32 {
    let mut difference = i64::from(to.total_seconds()) - i64::from(from.total_seconds());
    if difference < 0 {
        difference += SECONDS_PER_DAY;
    }
    (difference / 60) as u32
}

/// `HHMM` on five digits, seconds dropped
pub fn compact_time(time: Time) -> String {
    prefix_with_zeros(time.hours() * 100 + time.minutes(), 5)
}

/// `HH:MM`, seconds dropped
pub fn hours_minutes(time: Time) -> String {
    format!("{:02}:{:02}", time.hours(), time.minutes())
}

/// `dd.mm.yyyy`
pub fn hrdf_date(date: Date) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// The year of a date, as written in the timetable name
pub fn hrdf_year(date: Date) -> String {
    date.year().to_string()
}

/// Uppercase hexadecimal form of the binary number `11<bits>`.
///
/// The two leading marker bits are part of the HRDF bitfield format.
pub fn binary_to_hex(bits: &str) -> Result<String> {
    let bits = bits.trim();
    if let Some(wrong) = bits.chars().find(|c| *c != '0' && *c != '1') {
        bail!("'{}' is not a binary string, found '{}'", bits, wrong);
    }
    let marked = format!("11{}", bits);
    let padding = (4 - marked.len() % 4) % 4;
    let padded = format!("{}{}", "0".repeat(padding), marked);
    let hex: String = padded
        .as_bytes()
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .fold(0u8, |value, bit| (value << 1) | (bit - b'0'));
            format!("{:X}", value)
        })
        .collect();
    Ok(hex.trim_start_matches('0').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_padding() {
        assert_eq!("000007", prefix_with_zeros(7, 6));
        assert_eq!("00900000", prefix_with_zeros("900000", 8));
        assert_eq!("1234567", prefix_with_zeros(1_234_567, 6));
    }

    #[test]
    fn difference_in_minutes() {
        let difference = |from: &str, to: &str| {
            time_difference_in_minutes(from.parse().unwrap(), to.parse().unwrap())
        };
        assert_eq!(90, difference("08:00:00", "09:30:00"));
        assert_eq!(120, difference("23:00:00", "01:00:00"));
        assert_eq!(0, difference("08:00:00", "08:00:00"));
        assert_eq!(59, difference("08:00:30", "09:00:00"));
        assert_eq!(1439, difference("08:00:30", "08:00:00"));
    }

    #[test]
    fn compact_times() {
        assert_eq!("00800", compact_time(Time::new(8, 0, 0)));
        assert_eq!("02359", compact_time(Time::new(23, 59, 59)));
        assert_eq!("00005", compact_time(Time::new(0, 5, 0)));
        assert_eq!("08:05", hours_minutes(Time::new(8, 5, 30)));
    }

    #[test]
    fn dates() {
        let date = Date::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!("15.12.2024", hrdf_date(date));
        assert_eq!("2024", hrdf_year(date));
    }

    #[test]
    fn hexadecimal_bitfields() {
        assert_eq!("3", binary_to_hex("").unwrap());
        assert_eq!("1FF", binary_to_hex("1111111").unwrap());
        assert_eq!("F", binary_to_hex("11").unwrap());
        assert_eq!("C0", binary_to_hex("000000").unwrap());
        assert_eq!("DA", binary_to_hex(" 011010\n").unwrap());
    }

    #[test]
    #[should_panic(expected = "'1012' is not a binary string")]
    fn not_binary() {
        binary_to_hex("1012").unwrap();
    }
}
