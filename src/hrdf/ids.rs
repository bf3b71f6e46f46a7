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

//! Identifiers handed out during an export.
//!
//! Every range starts high enough not to collide with the identifiers of
//! the regular HRDF export the generated files are merged into.

/// First calendar (BITFELD) number
pub const FIRST_BITFIELD_ID: u32 = 900_000;
/// First note (INFOTEXT) number
pub const FIRST_INFOTEXT_ID: u32 = 900_000_001;
/// First service area (REGION) number
pub const FIRST_REGION_ID: u32 = 1;
/// First synthetic stop number
pub const FIRST_SYNTHETIC_STOP_ID: u32 = 9_500_000;
/// First trip sequence number
pub const FIRST_TRIP_ID: u32 = 1;

/// A monotonic counter
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// A counter whose first allocation is `first`
    pub fn starting_at(first: u32) -> Self {
        IdAllocator { next: first }
    }

    /// Hand out the current value and advance
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The counters of one export
#[derive(Debug, Clone)]
pub struct IdAllocators {
    /// Calendars
    pub bitfield: IdAllocator,
    /// Notes
    pub infotext: IdAllocator,
    /// Service areas
    pub region: IdAllocator,
    /// Synthetic stops
    pub synthetic_stop: IdAllocator,
    /// Trips
    pub trip: IdAllocator,
}

impl Default for IdAllocators {
    fn default() -> Self {
        IdAllocators {
            bitfield: IdAllocator::starting_at(FIRST_BITFIELD_ID),
            infotext: IdAllocator::starting_at(FIRST_INFOTEXT_ID),
            region: IdAllocator::starting_at(FIRST_REGION_ID),
            synthetic_stop: IdAllocator::starting_at(FIRST_SYNTHETIC_STOP_ID),
            trip: IdAllocator::starting_at(FIRST_TRIP_ID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn allocators_are_independent() {
        let mut ids = IdAllocators::default();
        assert_eq!(900_000, ids.bitfield.allocate());
        assert_eq!(900_001, ids.bitfield.allocate());
        assert_eq!(900_000_001, ids.infotext.allocate());
        assert_eq!(1, ids.region.allocate());
        assert_eq!(9_500_000, ids.synthetic_stop.allocate());
        assert_eq!(1, ids.trip.allocate());
        assert_eq!(2, ids.trip.allocate());
        assert_eq!(900_002, ids.bitfield.allocate());
    }
}
