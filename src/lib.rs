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

//! The `odv_hrdf` crate converts the on-demand offers ("ODV") of a
//! [NeTEx](http://netex-cen.eu/) document into the
//! [HRDF](https://opentransportdata.swiss/de/cookbook/hafas-rohdaten-format-hrdf/)
//! files consumed by the HAFAS scheduling system.
//!
//! The conversion is a single pass: [netex::read] loads the document into
//! a [Model], then [hrdf::Exporter] walks its flexible lines and writes the
//! HRDF channels.

#![deny(missing_docs)]

#[macro_use]
pub(crate) mod utils;
pub mod configuration;
pub mod geometry;
pub mod hrdf;
pub mod input;
mod minidom_utils;
pub mod model;
pub mod netex;
pub mod objects;
pub mod previous;
#[doc(hidden)]
pub mod test_utils;
mod version_utils;

pub use utils::{unzip_to, zip_to};
pub use version_utils::{binary_full_version, GIT_VERSION};

/// The error type used by the crate.
pub type Error = anyhow::Error;

/// The corresponding result type used by the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub use crate::model::Model;

/// Convert the single NeTEx document of `input_folder` into the HRDF
/// channels of `output_folder`.
///
/// `offers` restricts the conversion to the flexible lines with these
/// names, an empty slice converts all of them. `attribute_catalog` is the
/// verbatim seed of the ATTRIBUT channel.
pub fn convert<P, Q>(
    input_folder: P,
    output_folder: Q,
    offers: &[String],
    attribute_catalog: Option<&std::path::Path>,
) -> Result<()>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    let netex_path = input::find_single_document(input_folder)?;
    let model = netex::read(&netex_path)?;
    hrdf::Exporter::new(&model, offers).write(output_folder, attribute_catalog)
}
