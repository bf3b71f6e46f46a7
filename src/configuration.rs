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
//! Optional configuration file of the conversion.

use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings that can be shared between runs instead of being repeated on
/// the command line.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Names of the flexible lines to convert, all of them if empty
    #[serde(default)]
    pub offers: Vec<String>,
    /// Verbatim seed of the ATTRIBUT file
    pub attribute_catalog: Option<PathBuf>,
}

/// Read a JSON configuration file. Without a path, the default
/// configuration converts every offer and has no attribute catalog.
///
/// Below is an example of this file
/// ```text
/// {
///     "offers": ["Rufbus Thal", "PubliCar Vallée de Joux"],
///     "attribute_catalog": "resources/attribut"
/// }
/// ```
pub fn read_config<P: AsRef<Path>>(config_path: Option<P>) -> Result<Configuration> {
    let config_path = match config_path {
        Some(config_path) => config_path,
        None => return Ok(Configuration::default()),
    };
    let config_path = config_path.as_ref();
    info!("Reading configuration from {:?}", config_path);
    let json_config_file = File::open(config_path)
        .with_context(|| format!("Error reading {:?}", config_path))?;
    let configuration = serde_json::from_reader(json_config_file)
        .with_context(|| format!("Error parsing {:?}", config_path))?;
    Ok(configuration)
}

/// Split a comma-separated list of offers, ignoring blanks.
pub fn parse_offers(offers: &str) -> Vec<String> {
    offers
        .split(',')
        .map(str::trim)
        .filter(|offer| !offer.is_empty())
        .map(str::to_string)
        .collect()
}
