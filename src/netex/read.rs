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

use super::{calendars, journeys, lines, stops};
use crate::{
    model::{Collections, Model},
    Result,
};
use anyhow::{anyhow, Context};
use minidom::Element;
use std::{fs::File, io::Read, path::Path};
use tracing::info;

/// Read a NeTEx document into a [Model]
pub fn read<P>(netex_path: P) -> Result<Model>
where
    P: AsRef<Path>,
{
    let path = netex_path.as_ref();
    info!("Reading NeTEx document {:?}", path);
    let mut file = File::open(path).with_context(ctx_from_path!(path))?;
    let mut file_content = String::new();
    file.read_to_string(&mut file_content)
        .with_context(ctx_from_path!(path))?;
    let root = file_content
        .parse::<Element>()
        .map_err(|e| anyhow!("Failed to parse file '{:?}': {}", path, e))?;
    Model::new(read_collections(&root)?)
}

pub(crate) fn read_collections(root: &Element) -> Result<Collections> {
    let mut collections = Collections::default();
    collections.validity_period = calendars::load_validity_period(root)?;
    collections.valid_day_bits = calendars::load_valid_day_bits(root);
    collections.availability_conditions = calendars::load_availability_conditions(root)?;
    collections.flexible_lines = lines::load_flexible_lines(root)?;
    collections.service_journeys = journeys::load_service_journeys(root)?;
    collections.service_journey_patterns = journeys::load_service_journey_patterns(root)?;
    collections.flexible_stop_assignments = stops::load_flexible_stop_assignments(root);
    collections.flexible_areas = stops::load_flexible_areas(root)?;
    collections.regular_stops = stops::load_regular_stops(root);
    info!(
        "{} flexible lines, {} service journeys and {} regular stops read",
        collections.flexible_lines.len(),
        collections.service_journeys.len(),
        collections.regular_stops.len()
    );
    Ok(collections)
}
