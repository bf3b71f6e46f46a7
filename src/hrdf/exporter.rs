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

use super::{correlator::Correlator, seeds, HrdfWriter};
use crate::{objects::FlexibleLine, Model, Result};
use std::path::Path;
use tracing::{info, warn};

/// Export of a [Model] as HRDF files
pub struct Exporter<'a> {
    model: &'a Model,
    offers: &'a [String],
}

impl<'a> Exporter<'a> {
    /// Export the flexible lines named in `offers`, or all of them when
    /// `offers` is empty
    pub fn new(model: &'a Model, offers: &'a [String]) -> Self {
        Exporter { model, offers }
    }

    fn is_selected(&self, line: &FlexibleLine) -> bool {
        self.offers.is_empty() || self.offers.contains(&line.name)
    }

    /// Write every HRDF file into `path`, which is created if needed.
    /// `attribute_catalog` is copied as the ATTRIBUT file.
    pub fn write<P: AsRef<Path>>(&self, path: P, attribute_catalog: Option<&Path>) -> Result<()> {
        for offer in self.offers {
            if !self
                .model
                .flexible_lines
                .values()
                .any(|line| &line.name == offer)
            {
                warn!("No flexible line named '{}'", offer);
            }
        }

        let mut writer = HrdfWriter::create(path)?;
        info!("Creating ZUGART");
        seeds::write_zugart(&mut writer)?;
        seeds::write_attribut(&mut writer, attribute_catalog)?;
        info!("Creating ECKDATEN");
        seeds::write_eckdaten(&mut writer, self.model.validity_period.as_ref())?;

        let mut correlator = Correlator::new(self.model, writer);
        correlator.encode_calendars()?;
        for line in self.model.flexible_lines.values() {
            if self.is_selected(line) {
                correlator.correlate_line(line)?;
            } else {
                info!("Not loading: {}", line.name);
            }
        }
        correlator.finish()
    }
}
