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

use crate::{
    minidom_utils::{Descendants, TryAttribute},
    objects::{FlexibleArea, FlexibleStopAssignment, RegularStop, Vertex},
    Result,
};
use anyhow::{anyhow, Context};
use geo::Coord;
use minidom::Element;
use tracing::debug;
use typed_index_collection::{Collection, CollectionWithId};

const REGULAR_STOP_PLACE_TYPE: &str = "regularStop";

pub(super) fn load_flexible_stop_assignments(root: &Element) -> Collection<FlexibleStopAssignment> {
    let mut flexible_stop_assignments = Collection::default();
    for element in root.descendants("FlexibleStopAssignment") {
        let scheduled_stop_point_ref = skip_fail!(element.try_reference("ScheduledStopPointRef"));
        let flexible_area_ref = skip_fail!(element.try_reference("FlexibleAreaRef"));
        flexible_stop_assignments.push(FlexibleStopAssignment {
            scheduled_stop_point_ref,
            flexible_area_ref,
        });
    }
    flexible_stop_assignments
}

/// Parse a `gml:pos`, `"<longitude> <latitude>"`, keeping its text
fn parse_vertex(text: &str) -> Result<Vertex> {
    let text = text.trim();
    let mut values = text.split_whitespace().map(str::parse::<f64>);
    match (values.next(), values.next()) {
        (Some(Ok(x)), Some(Ok(y))) => Ok(Vertex {
            text: text.to_string(),
            coord: Coord { x, y },
        }),
        _ => Err(anyhow!("Failed to parse coordinates '{}'", text)),
    }
}

fn load_flexible_area(element: &Element) -> Result<FlexibleArea> {
    let id: String = element.try_attribute("id")?;
    let name = element
        .try_text("Name")
        .with_context(|| format!("FlexibleArea '{}' has no name", id))?;
    let boundary = match element.descendant("Polygon") {
        Some(polygon) => polygon
            .descendants("pos")
            .into_iter()
            .map(|pos| parse_vertex(&pos.text()))
            .collect::<Result<_>>()
            .with_context(|| format!("In FlexibleArea '{}'", id))?,
        None => Vec::new(),
    };
    Ok(FlexibleArea { id, name, boundary })
}

pub(super) fn load_flexible_areas(root: &Element) -> Result<CollectionWithId<FlexibleArea>> {
    let mut flexible_areas = CollectionWithId::default();
    for element in root.descendants("FlexibleArea") {
        let flexible_area = load_flexible_area(element)?;
        skip_fail!(flexible_areas.push(flexible_area));
    }
    Ok(flexible_areas)
}

fn load_regular_stop(stop_place: &Element) -> Result<RegularStop> {
    let id: String = stop_place.attribute("id").unwrap_or_default();
    let load = || -> Result<RegularStop> {
        let longitude = stop_place.try_text("Longitude")?;
        let latitude = stop_place.try_text("Latitude")?;
        let coord = Coord {
            x: longitude
                .parse()
                .with_context(|| format!("Failed to parse longitude '{}'", longitude))?,
            y: latitude
                .parse()
                .with_context(|| format!("Failed to parse latitude '{}'", latitude))?,
        };
        Ok(RegularStop {
            public_code: stop_place.try_text("PublicCode")?,
            name: stop_place.try_text("Name")?,
            coord,
        })
    };
    load().with_context(|| format!("StopPlace '{}' ignored", id))
}

/// The stop places typed as regular stops, in document order. Other stop
/// places, and those without a type, are left aside.
pub(super) fn load_regular_stops(root: &Element) -> Collection<RegularStop> {
    let mut regular_stops = Collection::default();
    for stop_place in root.descendants("StopPlace") {
        let type_of_place: Option<String> = stop_place
            .descendant("TypeOfPlaceRef")
            .and_then(|type_of_place| type_of_place.attribute("ref"));
        match type_of_place {
            Some(type_of_place) if type_of_place.contains(REGULAR_STOP_PLACE_TYPE) => {}
            _ => {
                debug!("StopPlace {:?} is not a regular stop", stop_place.attr("id"));
                continue;
            }
        }
        regular_stops.push(skip_fail!(load_regular_stop(stop_place)));
    }
    regular_stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flexible_areas() {
        let xml = r#"<stopPlaces xmlns="http://www.netex.org.uk/netex" xmlns:gml="http://www.opengis.net/gml/3.2">
            <FlexibleStopPlace id="fsp:1">
                <areas>
                    <FlexibleArea id="area:1">
                        <Name>Thal</Name>
                        <gml:Polygon gml:id="polygon:1">
                            <gml:exterior>
                                <gml:LinearRing>
                                    <gml:pos>7.6 47.3</gml:pos>
                                    <gml:pos>7.7 47.3</gml:pos>
                                    <gml:pos>7.7 47.4</gml:pos>
                                </gml:LinearRing>
                            </gml:exterior>
                        </gml:Polygon>
                    </FlexibleArea>
                    <FlexibleArea id="area:2">
                        <Name>Nowhere</Name>
                    </FlexibleArea>
                </areas>
            </FlexibleStopPlace>
        </stopPlaces>"#;
        let root: Element = xml.parse().unwrap();
        let flexible_areas = load_flexible_areas(&root).unwrap();
        let area = flexible_areas.get("area:1").unwrap();
        assert_eq!("Thal", area.name);
        let texts: Vec<_> = area.boundary.iter().map(|vertex| &vertex.text).collect();
        assert_eq!(vec!["7.6 47.3", "7.7 47.3", "7.7 47.4"], texts);
        assert_eq!(Coord { x: 7.7, y: 47.4 }, area.boundary[2].coord);
        assert!(flexible_areas.get("area:2").unwrap().boundary.is_empty());
    }

    #[test]
    #[should_panic(expected = "Failed to parse coordinates '7.6'")]
    fn vertex_without_latitude() {
        parse_vertex("7.6").unwrap();
    }

    #[test]
    fn flexible_stop_assignments() {
        let xml = r#"<stopAssignments xmlns="http://www.netex.org.uk/netex">
            <FlexibleStopAssignment id="fsa:1">
                <ScheduledStopPointRef ref="ssp:1" />
                <FlexibleStopPlaceRef ref="fsp:1" />
                <FlexibleAreaRef ref="area:1" />
            </FlexibleStopAssignment>
            <FlexibleStopAssignment id="fsa:2">
                <ScheduledStopPointRef ref="ssp:2" />
            </FlexibleStopAssignment>
        </stopAssignments>"#;
        let root: Element = xml.parse().unwrap();
        let assignments = load_flexible_stop_assignments(&root);
        assert_eq!(1, assignments.len());
        let assignment = assignments.values().next().unwrap();
        assert_eq!("ssp:1", assignment.scheduled_stop_point_ref);
        assert_eq!("area:1", assignment.flexible_area_ref);
    }

    #[test]
    fn regular_stops() {
        let xml = r#"<stopPlaces xmlns="http://www.netex.org.uk/netex">
            <StopPlace id="sp:1">
                <Name>Balsthal, Post</Name>
                <Centroid>
                    <Location>
                        <Longitude>7.69</Longitude>
                        <Latitude>47.31</Latitude>
                    </Location>
                </Centroid>
                <PublicCode>8500001</PublicCode>
                <placeTypes>
                    <TypeOfPlaceRef ref="ch:1:TypeOfPlace:regularStop" />
                </placeTypes>
            </StopPlace>
            <StopPlace id="sp:2">
                <Name>Meeting point</Name>
                <PublicCode>8500002</PublicCode>
                <placeTypes>
                    <TypeOfPlaceRef ref="ch:1:TypeOfPlace:meetingPoint" />
                </placeTypes>
            </StopPlace>
            <StopPlace id="sp:3">
                <Name>Untyped</Name>
            </StopPlace>
            <StopPlace id="sp:4">
                <Name>Nowhere</Name>
                <PublicCode>8500004</PublicCode>
                <placeTypes>
                    <TypeOfPlaceRef ref="regularStop" />
                </placeTypes>
            </StopPlace>
        </stopPlaces>"#;
        let root: Element = xml.parse().unwrap();
        let regular_stops = load_regular_stops(&root);
        assert_eq!(1, regular_stops.len());
        assert_eq!(
            &RegularStop {
                public_code: "8500001".to_string(),
                name: "Balsthal, Post".to_string(),
                coord: Coord { x: 7.69, y: 47.31 },
            },
            regular_stops.values().next().unwrap()
        );
    }
}
