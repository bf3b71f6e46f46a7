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
    format::prefix_with_zeros,
    ids::IdAllocator,
    stops::{SyntheticStop, SyntheticStops},
    HrdfFile, HrdfWriter,
};
use crate::{
    geometry::is_point_in_polygon,
    model::{Model, ServiceArea},
    objects::{FlexibleArea, RegularStop, Vertex},
    Result,
};
use geo::Coord;
use tracing::{info, warn};

/// Headers of the blocks of stops where the area can be boarded, then
/// alighted. Both blocks list the stops inside the area.
const ELIGIBLE_STOPS_HEADERS: [&str; 2] = ["*AS", "*AC"];

/// Write the service areas of `pattern_id` and link them to `stops`.
///
/// Areas without boundary are logged and skipped, they consume no region
/// number.
pub fn export(
    model: &Model,
    pattern_id: &str,
    stops: &SyntheticStops,
    ids: &mut IdAllocator,
    writer: &mut HrdfWriter,
) -> Result<()> {
    for service_area in model.service_areas(pattern_id)? {
        match service_area {
            ServiceArea::Polygon(area) => write_area(model, area, stops, ids, writer)?,
            ServiceArea::NoGeometry(area) => warn!("{} had no polygons", area.name),
        }
    }
    Ok(())
}

fn write_area(
    model: &Model,
    area: &FlexibleArea,
    stops: &SyntheticStops,
    ids: &mut IdAllocator,
    writer: &mut HrdfWriter,
) -> Result<()> {
    let region_id = ids.allocate();
    writer.write(
        HrdfFile::Region,
        &format!("*R {} {}", prefix_with_zeros(region_id, 8), area.name),
    )?;
    writer.write(HrdfFile::Region, "*C 0")?;
    writer.write(HrdfFile::Region, "*P +")?;
    for (index, vertex) in area.boundary.iter().enumerate() {
        if index == 0 {
            write_stop_coordinates(vertex, stops, writer)?;
            write_stop_access(stops, writer)?;
        }
        writer.write(HrdfFile::Region, &vertex.text)?;
    }
    writer.write_blank(HrdfFile::Region)?;

    for stop in stops.iter() {
        write_region_stop(stop, &stops.name, writer)?;
    }
    writer.write_blank(HrdfFile::Region)?;

    let polygon: Vec<Coord<f64>> = area.boundary.iter().map(|vertex| vertex.coord).collect();
    let inside: Vec<&RegularStop> = model
        .regular_stops
        .values()
        .filter(|stop| is_point_in_polygon(stop.coord, &polygon))
        .collect();
    info!("{} regular stops inside {}", inside.len(), area.name);
    for header in ELIGIBLE_STOPS_HEADERS.iter() {
        write_eligible_stops(header, &inside, writer)?;
        writer.write_blank(HrdfFile::Region)?;
    }
    Ok(())
}

/// All the synthetic stops are located on the first vertex of the area
fn write_stop_coordinates(
    vertex: &Vertex,
    stops: &SyntheticStops,
    writer: &mut HrdfWriter,
) -> Result<()> {
    info!("Creating BFKOORD");
    for stop in stops.iter() {
        writer.write(
            HrdfFile::Bfkoord,
            &format!("{}  {}  % {} {}", stop.id, vertex.text, stops.name, stop.role),
        )?;
    }
    writer.write_blank(HrdfFile::Bfkoord)?;
    writer.write_blank(HrdfFile::Bfkoord)?;
    Ok(())
}

fn write_stop_access(stops: &SyntheticStops, writer: &mut HrdfWriter) -> Result<()> {
    info!("Creating BHFART");
    for stop in stops.iter() {
        let label = format!("{} {}", stops.name, stop.role);
        writer.write(HrdfFile::Bhfart, &format!("{} B  7  0 {}", stop.id, label))?;
        writer.write(HrdfFile::Bhfart, &format!("{} P % {}", stop.id, label))?;
        writer.write(HrdfFile::Bhfart, &format!("{} E T % {}", stop.id, label))?;
    }
    writer.write_blank(HrdfFile::Bhfart)?;
    Ok(())
}

fn write_region_stop(stop: &SyntheticStop, name: &str, writer: &mut HrdfWriter) -> Result<()> {
    writer.write(HrdfFile::Region, &format!("*{}", stop.role))?;
    writer.write(HrdfFile::Region, "*IS")?;
    if stop.role.allows_boarding() {
        writer.write(HrdfFile::Region, "*BAS")?;
    }
    writer.write(HrdfFile::Region, &format!("{} % {}", stop.id, name))?;
    Ok(())
}

fn write_eligible_stops(
    header: &str,
    stops: &[&RegularStop],
    writer: &mut HrdfWriter,
) -> Result<()> {
    if stops.is_empty() {
        return Ok(());
    }
    writer.write(HrdfFile::Region, header)?;
    for stop in stops {
        writer.write(
            HrdfFile::Region,
            &format!("{} % {}", stop.public_code, stop.name),
        )?;
        writer.write(
            HrdfFile::Bhfart,
            &format!("{} P % {}", stop.public_code, stop.name),
        )?;
    }
    Ok(())
}
