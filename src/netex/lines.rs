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
    objects::{BookingArrangement, FlexibleLine},
    Result,
};
use anyhow::Context;
use minidom::Element;
use typed_index_collection::CollectionWithId;

fn load_booking_arrangement(element: &Element) -> Result<BookingArrangement> {
    let booking_arrangement = BookingArrangement {
        id: element.try_attribute("id")?,
        booking_note: element
            .descendant("BookingNote")
            .map(|note| note.text().trim().to_string()),
    };
    Ok(booking_arrangement)
}

fn load_flexible_line(element: &Element) -> Result<FlexibleLine> {
    let id: String = element.try_attribute("id")?;
    let name = element
        .try_text("Name")
        .with_context(|| format!("FlexibleLine '{}' has no name", id))?;
    let booking_arrangements = element
        .descendants("BookingArrangement")
        .into_iter()
        .map(load_booking_arrangement)
        .collect::<Result<_>>()
        .with_context(|| format!("In FlexibleLine '{}'", id))?;
    Ok(FlexibleLine {
        id,
        name,
        booking_arrangements,
    })
}

pub(super) fn load_flexible_lines(root: &Element) -> Result<CollectionWithId<FlexibleLine>> {
    let mut flexible_lines = CollectionWithId::default();
    for element in root.descendants("FlexibleLine") {
        let flexible_line = load_flexible_line(element)?;
        skip_fail!(flexible_lines.push(flexible_line));
    }
    Ok(flexible_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flexible_lines_with_booking_arrangements() {
        let xml = r#"<lines xmlns="http://www.netex.org.uk/netex">
            <FlexibleLine id="ch:1:FlexibleLine:1" version="1">
                <Name>Rufbus Thal</Name>
                <FlexibleLineType>flexibleAreasOnly</FlexibleLineType>
                <BookingArrangements>
                    <BookingArrangement id="ch:1:BookingArrangement:VR_1">
                        <BookingNote>Reservation required</BookingNote>
                    </BookingArrangement>
                    <BookingArrangement id="ch:1:BookingArrangement:_2">
                        <BookingNote>
                            Call 0800 000 000 one hour in advance
                        </BookingNote>
                    </BookingArrangement>
                </BookingArrangements>
            </FlexibleLine>
            <FlexibleLine id="ch:1:FlexibleLine:2" version="1">
                <Name>PubliCar</Name>
            </FlexibleLine>
            <FlexibleLine id="ch:1:FlexibleLine:1" version="2">
                <Name>Rufbus Thal bis</Name>
            </FlexibleLine>
        </lines>"#;
        let root: Element = xml.parse().unwrap();
        let flexible_lines = load_flexible_lines(&root).unwrap();
        let names: Vec<_> = flexible_lines.values().map(|line| &line.name).collect();
        assert_eq!(vec!["Rufbus Thal", "PubliCar"], names);

        let line = flexible_lines.get("ch:1:FlexibleLine:1").unwrap();
        assert_eq!(
            vec![
                BookingArrangement {
                    id: "ch:1:BookingArrangement:VR_1".to_string(),
                    booking_note: Some("Reservation required".to_string()),
                },
                BookingArrangement {
                    id: "ch:1:BookingArrangement:_2".to_string(),
                    booking_note: Some("Call 0800 000 000 one hour in advance".to_string()),
                },
            ],
            line.booking_arrangements
        );
        assert!(flexible_lines
            .get("ch:1:FlexibleLine:2")
            .unwrap()
            .booking_arrangements
            .is_empty());
    }

    #[test]
    #[should_panic(expected = "FlexibleLine 'fl:1' has no name")]
    fn flexible_line_without_name() {
        let xml = r#"<FlexibleLine xmlns="http://www.netex.org.uk/netex" id="fl:1" />"#;
        let root: Element = xml.parse().unwrap();
        load_flexible_line(&root).unwrap();
    }
}
