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

use super::{
    format::{compact_time, hours_minutes, prefix_with_zeros, time_difference_in_minutes},
    ids::IdAllocator,
    infotexts::LineAnnotations,
    stops::{StopRole, SyntheticStops},
    HrdfFile, HrdfWriter,
};
use crate::objects::{AvailabilityCondition, FlexibleLine, ServiceJourneyPattern};
use crate::Result;

/// A distinct (line, availability condition, journey pattern) of the
/// document
#[derive(Debug, Clone, Copy)]
pub struct TripCombination<'a> {
    /// The line
    pub line: &'a FlexibleLine,
    /// When the service runs
    pub availability_condition: &'a AvailabilityCondition,
    /// Identifier of the journey pattern
    pub pattern_id: &'a str,
}

/// What a trip refers to besides its combination
#[derive(Debug, Clone, Copy)]
pub struct TripReferences<'a> {
    /// BITFELD number of the availability condition
    pub bitfield: u32,
    /// Attribute codes and notes of the line
    pub annotations: &'a LineAnnotations,
    /// Synthetic stops of the line and journey pattern
    pub stops: &'a SyntheticStops,
}

/// Write the three FPLAN trips of a combination, one per pair of
/// boundary roles. Both stops of a trip use the start time.
pub fn write_trips(
    combination: TripCombination<'_>,
    references: TripReferences<'_>,
    ids: &mut IdAllocator,
    writer: &mut HrdfWriter,
) -> Result<()> {
    let line_name = &combination.line.name;
    let suffix = ServiceJourneyPattern::suffix(combination.pattern_id);
    let start_time = combination.availability_condition.start_time;
    let end_time = combination.availability_condition.end_time;
    let duration = prefix_with_zeros(time_difference_in_minutes(start_time, end_time), 4);
    let departure = compact_time(start_time);
    for (departure_role, arrival_role) in StopRole::PAIRS.iter().copied() {
        let trip_id = prefix_with_zeros(ids.allocate(), 6);
        let mut fplan = |record: &str| writer.write(HrdfFile::Fplan, record);
        fplan(&format!("% {} {} {}", line_name, suffix, departure_role))?;
        fplan(&format!(
            "% {}-{} Uhr",
            hours_minutes(start_time),
            hours_minutes(end_time)
        ))?;
        fplan(&format!("*T {} AST___ {} 0060", trip_id, duration))?;
        fplan(&format!("*A VE{:17}{}", "", references.bitfield))?;
        fplan("*G TEL")?;
        for code in &references.annotations.attribute_codes {
            fplan(&format!("*A {}", code))?;
        }
        for infotext_id in &references.annotations.infotext_ids {
            fplan(&format!("*I ZZ{:24}{}", "", infotext_id))?;
        }
        fplan(&format!(
            "{} {}{:26}{}",
            references.stops.id(departure_role),
            departure_role,
            "",
            departure
        ))?;
        fplan(&format!(
            "{} {}{:19}{}",
            references.stops.id(arrival_role),
            arrival_role,
            "",
            departure
        ))?;
        fplan("")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hrdf::ids::{FIRST_SYNTHETIC_STOP_ID, FIRST_TRIP_ID};
    use crate::objects::Time;
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_trips_per_combination() {
        test_in_tmp_dir(|path| {
            let mut writer = HrdfWriter::create(path).unwrap();
            let mut stop_ids = IdAllocator::starting_at(FIRST_SYNTHETIC_STOP_ID);
            let mut trip_ids = IdAllocator::starting_at(FIRST_TRIP_ID);
            let stops =
                SyntheticStops::generate("Rufbus SJP_1", &mut stop_ids, &mut writer).unwrap();
            let line = FlexibleLine {
                id: "fl:1".to_string(),
                name: "Rufbus".to_string(),
                booking_arrangements: vec![],
            };
            let availability_condition = AvailabilityCondition {
                id: "ac:1".to_string(),
                start_time: Time::new(22, 30, 0),
                end_time: Time::new(0, 45, 0),
                valid_day_bits: "1".to_string(),
            };
            let annotations = LineAnnotations {
                attribute_codes: vec!["VR".to_string()],
                infotext_ids: vec![900_000_001],
            };
            let combination = TripCombination {
                line: &line,
                availability_condition: &availability_condition,
                pattern_id: "ch:1:ServiceJourneyPattern:SJP_1",
            };
            let references = TripReferences {
                bitfield: 900_000,
                annotations: &annotations,
                stops: &stops,
            };
            write_trips(combination, references, &mut trip_ids, &mut writer).unwrap();
            writer.finish().unwrap();

            let fplan = get_records(path.join("fplan"));
            assert_eq!(1 + 3 * 10, fplan.len());
            assert_eq!(
                vec![
                    "% Rufbus SJP_1 SSI",
                    "% 22:30-00:45 Uhr",
                    "*T 000001 AST___ 0135 0060",
                    "*A VE                 900000",
                    "*G TEL",
                    "*A VR",
                    "*I ZZ                        900000001",
                    "9500000 SSI                          02230",
                    "9500001 SDI                   02230",
                    "",
                ],
                fplan[1..11].to_vec()
            );
            assert_eq!("% Rufbus SJP_1 SSS", fplan[11]);
            assert_eq!("*T 000002 AST___ 0135 0060", fplan[13]);
            assert_eq!("9500002 SSS                          02230", fplan[18]);
            assert_eq!("9500003 SDS                   02230", fplan[19]);
            assert_eq!("% Rufbus SJP_1 SSD", fplan[21]);
            assert_eq!("9500005 SDD                   02230", fplan[29]);
            assert_eq!(4, trip_ids.allocate());
        });
    }
}
