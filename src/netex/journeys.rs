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
    objects::{ServiceJourney, ServiceJourneyPattern},
    Result,
};
use anyhow::Context;
use minidom::Element;
use typed_index_collection::{Collection, CollectionWithId};

fn load_service_journey(element: &Element) -> Result<ServiceJourney> {
    let id: String = element.attribute("id").unwrap_or_default();
    let load = || -> Result<ServiceJourney> {
        Ok(ServiceJourney {
            id: id.clone(),
            flexible_line_ref: element.try_reference("FlexibleLineRef")?,
            availability_condition_ref: element.try_reference("AvailabilityConditionRef")?,
            service_journey_pattern_ref: element.try_reference("ServiceJourneyPatternRef")?,
        })
    };
    load().with_context(|| format!("In ServiceJourney '{}'", id))
}

/// The service journeys in document order, duplicates included
pub(super) fn load_service_journeys(root: &Element) -> Result<Collection<ServiceJourney>> {
    let service_journeys = root
        .descendants("ServiceJourney")
        .into_iter()
        .map(load_service_journey)
        .collect::<Result<Vec<_>>>()?;
    Ok(Collection::new(service_journeys))
}

pub(super) fn load_service_journey_patterns(
    root: &Element,
) -> Result<CollectionWithId<ServiceJourneyPattern>> {
    let mut service_journey_patterns = CollectionWithId::default();
    for element in root.descendants("ServiceJourneyPattern") {
        let id: String = element.try_attribute("id")?;
        let scheduled_stop_point_ref = skip_fail!(element
            .try_reference("ScheduledStopPointRef")
            .with_context(|| format!("ServiceJourneyPattern '{}' ignored", id)));
        skip_fail!(service_journey_patterns.push(ServiceJourneyPattern {
            id,
            scheduled_stop_point_ref,
        }));
    }
    Ok(service_journey_patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_journeys_keep_duplicates() {
        let xml = r#"<vehicleJourneys xmlns="http://www.netex.org.uk/netex">
            <ServiceJourney id="sj:1">
                <validityConditions>
                    <AvailabilityConditionRef ref="ac:1" />
                </validityConditions>
                <ServiceJourneyPatternRef ref="sjp:1" />
                <FlexibleLineRef ref="fl:1" />
            </ServiceJourney>
            <ServiceJourney id="sj:2">
                <validityConditions>
                    <AvailabilityConditionRef ref="ac:1" />
                </validityConditions>
                <ServiceJourneyPatternRef ref="sjp:1" />
                <FlexibleLineRef ref="fl:1" />
            </ServiceJourney>
        </vehicleJourneys>"#;
        let root: Element = xml.parse().unwrap();
        let service_journeys = load_service_journeys(&root).unwrap();
        assert_eq!(2, service_journeys.len());
        let service_journey = service_journeys.values().next().unwrap();
        assert_eq!(
            &ServiceJourney {
                id: "sj:1".to_string(),
                flexible_line_ref: "fl:1".to_string(),
                availability_condition_ref: "ac:1".to_string(),
                service_journey_pattern_ref: "sjp:1".to_string(),
            },
            service_journey
        );
    }

    #[test]
    #[should_panic(expected = "In ServiceJourney 'sj:1'")]
    fn service_journey_without_pattern() {
        let xml = r#"<ServiceJourney xmlns="http://www.netex.org.uk/netex" id="sj:1">
            <AvailabilityConditionRef ref="ac:1" />
            <FlexibleLineRef ref="fl:1" />
        </ServiceJourney>"#;
        let root: Element = xml.parse().unwrap();
        load_service_journey(&root).unwrap();
    }

    #[test]
    fn service_journey_patterns() {
        let xml = r#"<journeyPatterns xmlns="http://www.netex.org.uk/netex">
            <ServiceJourneyPattern id="sjp:1">
                <pointsInSequence>
                    <StopPointInJourneyPattern id="spijp:1" order="1">
                        <ScheduledStopPointRef ref="ssp:1" />
                    </StopPointInJourneyPattern>
                    <StopPointInJourneyPattern id="spijp:2" order="2">
                        <ScheduledStopPointRef ref="ssp:2" />
                    </StopPointInJourneyPattern>
                </pointsInSequence>
            </ServiceJourneyPattern>
            <ServiceJourneyPattern id="sjp:2" />
        </journeyPatterns>"#;
        let root: Element = xml.parse().unwrap();
        let patterns = load_service_journey_patterns(&root).unwrap();
        assert_eq!(1, patterns.len());
        assert_eq!(
            "ssp:1",
            patterns.get("sjp:1").unwrap().scheduled_stop_point_ref
        );
    }
}
