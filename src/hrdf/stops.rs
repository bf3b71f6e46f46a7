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

use super::{ids::IdAllocator, HrdfFile, HrdfWriter};
use crate::Result;
use std::fmt::{self, Display, Formatter};

/// The boundary roles of a demand-responsive trip, each of them getting a
/// synthetic stop per line and journey pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopRole {
    /// Start of the service, departure
    Ssi,
    /// Start of the service, arrival
    Sdi,
    /// Within the service, departure
    Sss,
    /// Within the service, arrival
    Sds,
    /// End of the service, departure
    Ssd,
    /// End of the service, arrival
    Sdd,
}

impl StopRole {
    /// Every role, in allocation order
    pub const ALL: [StopRole; 6] = [
        StopRole::Ssi,
        StopRole::Sdi,
        StopRole::Sss,
        StopRole::Sds,
        StopRole::Ssd,
        StopRole::Sdd,
    ];

    /// The (departure, arrival) pairs a trip is written for
    pub const PAIRS: [(StopRole, StopRole); 3] = [
        (StopRole::Ssi, StopRole::Sdi),
        (StopRole::Sss, StopRole::Sds),
        (StopRole::Ssd, StopRole::Sdd),
    ];

    /// Code of the role in HRDF
    pub fn code(self) -> &'static str {
        match self {
            StopRole::Ssi => "SSI",
            StopRole::Sdi => "SDI",
            StopRole::Sss => "SSS",
            StopRole::Sds => "SDS",
            StopRole::Ssd => "SSD",
            StopRole::Sdd => "SDD",
        }
    }

    /// Whether the area can be boarded from this role
    pub fn allows_boarding(self) -> bool {
        !matches!(self, StopRole::Sds | StopRole::Ssd)
    }
}

impl Display for StopRole {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A generated stop standing for one role of a line and journey pattern
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticStop {
    /// Stop number
    pub id: u32,
    /// Role of the stop
    pub role: StopRole,
}

/// The six synthetic stops of a line and journey pattern
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticStops {
    /// `<line name> <pattern suffix>`
    pub name: String,
    stops: Vec<SyntheticStop>,
}

impl SyntheticStops {
    /// Allocate the six stops of `name` and write them to BAHNHOF
    pub fn generate(name: &str, ids: &mut IdAllocator, writer: &mut HrdfWriter) -> Result<Self> {
        let mut stops = Vec::with_capacity(StopRole::ALL.len());
        for role in StopRole::ALL.iter().copied() {
            let id = ids.allocate();
            writer.write(HrdfFile::Bahnhof, &format!("{}     {} {}", id, name, role))?;
            stops.push(SyntheticStop { id, role });
        }
        Ok(SyntheticStops {
            name: name.to_string(),
            stops,
        })
    }

    /// Number of the stop with `role`
    pub fn id(&self, role: StopRole) -> u32 {
        // one stop per role, in declaration order
        self.stops[role as usize].id
    }

    /// Iterate over the stops in role order
    pub fn iter(&self) -> impl Iterator<Item = &SyntheticStop> {
        self.stops.iter()
    }
}
