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

//! Definition of the in-memory view of a NeTEx document.

use crate::objects::*;
use crate::Result;
use anyhow::anyhow;
use std::collections::HashMap;
use std::ops;
use tracing::warn;
use typed_index_collection::{Collection, CollectionWithId, Idx};

/// The set of collections read from a NeTEx document.
///
/// Collections keep the document order, which drives the order of the
/// generated HRDF records.
#[derive(Debug, Default)]
pub struct Collections {
    /// Validity of the whole document, if declared
    pub validity_period: Option<ValidityPeriod>,
    /// Every `ValidDayBits` of the document, in document order
    pub valid_day_bits: Vec<String>,
    /// Collection of FlexibleLine
    pub flexible_lines: CollectionWithId<FlexibleLine>,
    /// Collection of AvailabilityCondition
    pub availability_conditions: CollectionWithId<AvailabilityCondition>,
    /// Collection of ServiceJourney
    pub service_journeys: Collection<ServiceJourney>,
    /// Collection of ServiceJourneyPattern
    pub service_journey_patterns: CollectionWithId<ServiceJourneyPattern>,
    /// Collection of FlexibleStopAssignment
    pub flexible_stop_assignments: Collection<FlexibleStopAssignment>,
    /// Collection of FlexibleArea
    pub flexible_areas: CollectionWithId<FlexibleArea>,
    /// Collection of RegularStop
    pub regular_stops: Collection<RegularStop>,
}

/// The result of the resolution of the service area of a journey pattern
#[derive(Debug)]
pub enum ServiceArea<'a> {
    /// An area with a boundary
    Polygon(&'a FlexibleArea),
    /// An area was found but has no boundary
    NoGeometry(&'a FlexibleArea),
}

/// The navigable view of the [Collections]: the cross references of the
/// document are indexed once so that every join is a lookup.
#[derive(Debug)]
pub struct Model {
    collections: Collections,
    areas_by_stop_point: HashMap<String, Vec<String>>,
    journeys_by_line: HashMap<String, Vec<Idx<ServiceJourney>>>,
}

impl Model {
    /// Constructs a model from the given `Collections`.
    pub fn new(collections: Collections) -> Result<Self> {
        let mut areas_by_stop_point: HashMap<String, Vec<String>> = HashMap::new();
        for assignment in collections.flexible_stop_assignments.values() {
            areas_by_stop_point
                .entry(assignment.scheduled_stop_point_ref.clone())
                .or_default()
                .push(assignment.flexible_area_ref.clone());
        }
        let mut journeys_by_line: HashMap<String, Vec<Idx<ServiceJourney>>> = HashMap::new();
        for (idx, journey) in collections.service_journeys.iter() {
            journeys_by_line
                .entry(journey.flexible_line_ref.clone())
                .or_default()
                .push(idx);
        }
        Ok(Model {
            collections,
            areas_by_stop_point,
            journeys_by_line,
        })
    }

    /// The service journeys of a line, in document order
    pub fn service_journeys_of<'a>(
        &'a self,
        line_id: &str,
    ) -> impl Iterator<Item = &'a ServiceJourney> + 'a {
        self.journeys_by_line
            .get(line_id)
            .into_iter()
            .flatten()
            .map(move |idx| &self.service_journeys[*idx])
    }

    /// Resolves the chain journey pattern → scheduled stop point → stop
    /// assignment → flexible area.
    ///
    /// An unknown journey pattern is an error. A stop point without
    /// assignment, or an assignment to an unknown area, resolves to no area.
    pub fn service_areas(&self, pattern_id: &str) -> Result<Vec<ServiceArea<'_>>> {
        let pattern = self
            .service_journey_patterns
            .get(pattern_id)
            .ok_or_else(|| anyhow!("ServiceJourneyPattern '{}' not found", pattern_id))?;
        let area_refs = self
            .areas_by_stop_point
            .get(&pattern.scheduled_stop_point_ref)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut areas = Vec::new();
        for area_ref in area_refs {
            match self.flexible_areas.get(area_ref) {
                Some(area) if area.boundary.is_empty() => {
                    areas.push(ServiceArea::NoGeometry(area))
                }
                Some(area) => areas.push(ServiceArea::Polygon(area)),
                None => warn!(
                    "FlexibleArea '{}' assigned to '{}' not found",
                    area_ref, pattern.scheduled_stop_point_ref
                ),
            }
        }
        Ok(areas)
    }
}

impl ops::Deref for Model {
    type Target = Collections;
    fn deref(&self) -> &Self::Target {
        &self.collections
    }
}
