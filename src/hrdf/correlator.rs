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
    bitfields::CalendarEncoder,
    ids::IdAllocators,
    infotexts,
    regions,
    stops::SyntheticStops,
    trips::{self, TripCombination, TripReferences},
    HrdfWriter,
};
use crate::{
    objects::{FlexibleLine, ServiceJourneyPattern},
    Model, Result,
};
use anyhow::anyhow;
use std::collections::{hash_map::Entry, HashMap, HashSet};
use tracing::info;

/// Walks the service journeys of the lines to export, in document order.
///
/// A (line, availability condition, journey pattern) triple is written
/// once however many journeys share it. The synthetic stops and the
/// service areas of a (line, journey pattern) pair are written before its
/// first trip.
pub(crate) struct Correlator<'m> {
    model: &'m Model,
    writer: HrdfWriter,
    ids: IdAllocators,
    calendars: CalendarEncoder,
}

impl<'m> Correlator<'m> {
    pub(crate) fn new(model: &'m Model, writer: HrdfWriter) -> Self {
        Correlator {
            model,
            writer,
            ids: IdAllocators::default(),
            calendars: CalendarEncoder::default(),
        }
    }

    /// Encode every `ValidDayBits` of the document, including those of the
    /// lines left out of the export
    pub(crate) fn encode_calendars(&mut self) -> Result<()> {
        info!("Creating BITFELD");
        for bits in &self.model.valid_day_bits {
            self.calendars
                .encode(bits, &mut self.ids.bitfield, &mut self.writer)?;
        }
        info!("{} bitfields created", self.calendars.len());
        Ok(())
    }

    pub(crate) fn correlate_line(&mut self, line: &'m FlexibleLine) -> Result<()> {
        let model = self.model;
        info!("Loading flexible line: {}", line.name);
        info!("Creating INFOTEXT");
        let annotations = infotexts::resolve(line, &mut self.ids.infotext, &mut self.writer)?;

        let mut trip_combinations: HashSet<(&str, &str, &str)> = HashSet::new();
        let mut line_combinations: HashMap<(&str, &str), SyntheticStops> = HashMap::new();
        for journey in model.service_journeys_of(&line.id) {
            let line_ref = journey.flexible_line_ref.as_str();
            let availability_condition_ref = journey.availability_condition_ref.as_str();
            let pattern_ref = journey.service_journey_pattern_ref.as_str();
            if !trip_combinations.insert((line_ref, availability_condition_ref, pattern_ref)) {
                continue;
            }
            info!(
                "Creating FPLAN for {} {} {}",
                line_ref, availability_condition_ref, pattern_ref
            );
            let availability_condition = model
                .availability_conditions
                .get(availability_condition_ref)
                .ok_or_else(|| {
                    anyhow!(
                        "AvailabilityCondition '{}' of ServiceJourney '{}' not found",
                        availability_condition_ref,
                        journey.id
                    )
                })?;

            let stops = match line_combinations.entry((line_ref, pattern_ref)) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    info!("Creating BAHNHOF for {}", pattern_ref);
                    let name = format!(
                        "{} {}",
                        line.name,
                        ServiceJourneyPattern::suffix(pattern_ref)
                    );
                    let stops = SyntheticStops::generate(
                        &name,
                        &mut self.ids.synthetic_stop,
                        &mut self.writer,
                    )?;
                    info!("Creating REGION");
                    regions::export(
                        model,
                        pattern_ref,
                        &stops,
                        &mut self.ids.region,
                        &mut self.writer,
                    )?;
                    entry.insert(stops)
                }
            };

            let bitfield = self.calendars.encode(
                &availability_condition.valid_day_bits,
                &mut self.ids.bitfield,
                &mut self.writer,
            )?;
            trips::write_trips(
                TripCombination {
                    line,
                    availability_condition,
                    pattern_id: pattern_ref,
                },
                TripReferences {
                    bitfield,
                    annotations: &annotations,
                    stops,
                },
                &mut self.ids.trip,
                &mut self.writer,
            )?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<()> {
        self.writer.finish()
    }
}
