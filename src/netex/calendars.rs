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
    objects::{AvailabilityCondition, Date, Time, ValidityPeriod},
    Result,
};
use anyhow::Context;
use chrono::{DateTime, NaiveDateTime};
use minidom::Element;
use typed_index_collection::CollectionWithId;

fn parse_date(date: &str) -> Result<Date> {
    let date = date.trim();
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|datetime| datetime.date())
        .or_else(|_| DateTime::parse_from_rfc3339(date).map(|datetime| datetime.date_naive()))
        .or_else(|_| Date::parse_from_str(date, "%Y-%m-%d"))
        .with_context(|| format!("Failed to parse date '{}'", date))
}

/// The validity of the first `CompositeFrame` declaring one
pub(super) fn load_validity_period(root: &Element) -> Result<Option<ValidityPeriod>> {
    let valid_between = root
        .descendants("CompositeFrame")
        .into_iter()
        .find_map(|frame| frame.descendant("ValidBetween"));
    let valid_between = match valid_between {
        Some(valid_between) => valid_between,
        None => return Ok(None),
    };
    let start_date = parse_date(&valid_between.try_text("FromDate")?)?;
    let end_date = parse_date(&valid_between.try_text("ToDate")?)?;
    Ok(Some(ValidityPeriod {
        start_date,
        end_date,
    }))
}

/// Every `ValidDayBits` of the document, whatever its parent
pub(super) fn load_valid_day_bits(root: &Element) -> Vec<String> {
    root.descendants("ValidDayBits")
        .into_iter()
        .map(|bits| bits.text().trim().to_string())
        .collect()
}

fn load_time(element: &Element, name: &str) -> Result<Time> {
    let text = element.try_text(name)?;
    text.parse::<Time>()
        .with_context(|| format!("Failed to parse {} '{}'", name, text))
}

fn load_availability_condition(element: &Element) -> Result<AvailabilityCondition> {
    let id: String = element.try_attribute("id")?;
    let availability_condition = AvailabilityCondition {
        start_time: load_time(element, "StartTime")
            .with_context(|| format!("In AvailabilityCondition '{}'", id))?,
        end_time: load_time(element, "EndTime")
            .with_context(|| format!("In AvailabilityCondition '{}'", id))?,
        valid_day_bits: element
            .try_text("ValidDayBits")
            .with_context(|| format!("In AvailabilityCondition '{}'", id))?,
        id,
    };
    Ok(availability_condition)
}

pub(super) fn load_availability_conditions(
    root: &Element,
) -> Result<CollectionWithId<AvailabilityCondition>> {
    let mut availability_conditions = CollectionWithId::default();
    for element in root.descendants("AvailabilityCondition") {
        let availability_condition = load_availability_condition(element)?;
        skip_fail!(availability_conditions.push(availability_condition));
    }
    Ok(availability_conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validity_period_of_first_composite_frame() {
        let xml = r#"<PublicationDelivery xmlns="http://www.netex.org.uk/netex">
            <PublicationTimestamp>2024-11-01T10:00:00</PublicationTimestamp>
            <dataObjects>
                <CompositeFrame id="cf:1">
                    <ValidBetween>
                        <FromDate>2024-12-15T00:00:00</FromDate>
                        <ToDate>2025-12-13</ToDate>
                    </ValidBetween>
                </CompositeFrame>
                <CompositeFrame id="cf:2">
                    <ValidBetween>
                        <FromDate>2023-12-10T00:00:00</FromDate>
                        <ToDate>2024-12-14T00:00:00</ToDate>
                    </ValidBetween>
                </CompositeFrame>
            </dataObjects>
        </PublicationDelivery>"#;
        let root: Element = xml.parse().unwrap();
        let validity_period = load_validity_period(&root).unwrap().unwrap();
        assert_eq!(
            Date::from_ymd_opt(2024, 12, 15).unwrap(),
            validity_period.start_date
        );
        assert_eq!(
            Date::from_ymd_opt(2025, 12, 13).unwrap(),
            validity_period.end_date
        );
    }

    #[test]
    fn no_validity_period() {
        let xml = r#"<PublicationDelivery xmlns="http://www.netex.org.uk/netex">
            <ValidBetween>
                <FromDate>2024-12-15T00:00:00</FromDate>
                <ToDate>2025-12-13T00:00:00</ToDate>
            </ValidBetween>
        </PublicationDelivery>"#;
        let root: Element = xml.parse().unwrap();
        assert_eq!(None, load_validity_period(&root).unwrap());
    }

    #[test]
    fn dates_with_time_zone() {
        assert_eq!(
            Date::from_ymd_opt(2024, 12, 15).unwrap(),
            parse_date("2024-12-15T00:00:00+01:00").unwrap()
        );
        assert!(parse_date("15.12.2024").is_err());
    }

    #[test]
    fn availability_conditions() {
        let xml = r#"<ServiceCalendarFrame xmlns="http://www.netex.org.uk/netex">
            <contentValidityConditions>
                <AvailabilityCondition id="ac:1">
                    <ValidDayBits>
                        1110011
                    </ValidDayBits>
                    <StartTime>08:00:00</StartTime>
                    <EndTime>01:30:00</EndTime>
                </AvailabilityCondition>
                <AvailabilityCondition id="ac:1">
                    <ValidDayBits>1111111</ValidDayBits>
                    <StartTime>09:00:00</StartTime>
                    <EndTime>10:00:00</EndTime>
                </AvailabilityCondition>
            </contentValidityConditions>
        </ServiceCalendarFrame>"#;
        let root: Element = xml.parse().unwrap();
        let availability_conditions = load_availability_conditions(&root).unwrap();
        assert_eq!(1, availability_conditions.len());
        let availability_condition = availability_conditions.get("ac:1").unwrap();
        assert_eq!(Time::new(8, 0, 0), availability_condition.start_time);
        assert_eq!(Time::new(1, 30, 0), availability_condition.end_time);
        assert_eq!("1110011", availability_condition.valid_day_bits);

        assert_eq!(
            vec!["1110011".to_string(), "1111111".to_string()],
            load_valid_day_bits(&root)
        );
    }

    #[test]
    #[should_panic(expected = "In AvailabilityCondition 'ac:1'")]
    fn availability_condition_without_end_time() {
        let xml = r#"<AvailabilityCondition xmlns="http://www.netex.org.uk/netex" id="ac:1">
            <ValidDayBits>1</ValidDayBits>
            <StartTime>08:00:00</StartTime>
        </AvailabilityCondition>"#;
        let root: Element = xml.parse().unwrap();
        load_availability_condition(&root).unwrap();
    }
}
