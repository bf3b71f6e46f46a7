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

//! Writer of the HRDF files of the on-demand offers.
//!
//! Every file is a stream of positional records ended by a carriage
//! return. The numbers allocated during an export (calendars, notes,
//! service areas, synthetic stops and trips) start in reserved ranges so
//! the files can be merged with a regular HRDF export.

mod bitfields;
mod correlator;
mod exporter;
mod format;
mod ids;
mod infotexts;
mod regions;
mod seeds;
mod stops;
mod trips;
mod writer;

pub use bitfields::CalendarEncoder;
pub use exporter::Exporter;
pub use format::{binary_to_hex, compact_time, prefix_with_zeros, time_difference_in_minutes};
pub use ids::{
    IdAllocator, IdAllocators, FIRST_BITFIELD_ID, FIRST_INFOTEXT_ID, FIRST_REGION_ID,
    FIRST_SYNTHETIC_STOP_ID, FIRST_TRIP_ID,
};
pub use infotexts::{attribute_code, LineAnnotations};
pub use stops::{StopRole, SyntheticStop, SyntheticStops};
pub use writer::{HrdfFile, HrdfWriter};
