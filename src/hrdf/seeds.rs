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

//! Channels that do not depend on the offers: the fixed category of
//! service, the attribute catalog and the timetable period.

use super::{
    format::{hrdf_date, hrdf_year},
    HrdfFile, HrdfWriter,
};
use crate::{objects::ValidityPeriod, Result};
use anyhow::anyhow;
use std::path::Path;
use tracing::{info, warn};

/// The demand-responsive category, class "Bus", in the four languages
const ZUGART_RECORDS: [&str; 14] = [
    "TEL 10   1  DRT      0 T     #104",
    "<text>",
    "<Deutsch>",
    "class6 Bus",
    "category104 DRT",
    "<Englisch>",
    "class6 Bus",
    "category104 DRT",
    "<Franzoesisch>",
    "class6 Bus",
    "category104 DRT",
    "<Italienisch>",
    "class6 Bus",
    "category104 DRT",
];

pub fn write_zugart(writer: &mut HrdfWriter) -> Result<()> {
    for record in ZUGART_RECORDS.iter() {
        writer.write(HrdfFile::Zugart, record)?;
    }
    Ok(())
}

/// Copy the catalog of the regular export, the attribute codes of the
/// booking arrangements refer to it.
pub fn write_attribut(writer: &mut HrdfWriter, catalog: Option<&Path>) -> Result<()> {
    match catalog {
        Some(catalog) => writer.seed_from(HrdfFile::Attribut, catalog),
        None => {
            warn!("No attribute catalog, {} only holds its header", HrdfFile::Attribut);
            Ok(())
        }
    }
}

pub fn write_eckdaten(
    writer: &mut HrdfWriter,
    validity_period: Option<&ValidityPeriod>,
) -> Result<()> {
    let validity_period = validity_period
        .ok_or_else(|| anyhow!("No ValidBetween found in a CompositeFrame"))?;
    info!(
        "Timetable from {} to {}",
        validity_period.start_date, validity_period.end_date
    );
    writer.write(
        HrdfFile::Eckdaten,
        &format!("{} Fahrplanstart", hrdf_date(validity_period.start_date)),
    )?;
    writer.write(
        HrdfFile::Eckdaten,
        &format!("{} Fahrplanende", hrdf_date(validity_period.end_date)),
    )?;
    writer.write(
        HrdfFile::Eckdaten,
        &format!("\"Angebotsplan {}\"", hrdf_year(validity_period.end_date)),
    )?;
    Ok(())
}
