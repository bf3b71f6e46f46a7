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

use super::{format::binary_to_hex, ids::IdAllocator, HrdfFile, HrdfWriter};
use crate::Result;
use std::collections::HashMap;
use tracing::debug;

/// Encoder of day-validity bit strings into BITFELD records.
///
/// A bit string is encoded once; later occurrences reuse its number.
#[derive(Debug, Default)]
pub struct CalendarEncoder {
    references: HashMap<String, u32>,
}

impl CalendarEncoder {
    /// The BITFELD number of `bits`, writing a new record on the first
    /// occurrence. Anything but `0` and `1` is an error.
    pub fn encode(
        &mut self,
        bits: &str,
        ids: &mut IdAllocator,
        writer: &mut HrdfWriter,
    ) -> Result<u32> {
        if let Some(reference) = self.references.get(bits) {
            return Ok(*reference);
        }
        let hex = binary_to_hex(bits)?;
        let reference = ids.allocate();
        writer.write(HrdfFile::Bitfeld, &format!("{} {}", reference, hex))?;
        debug!("Bitfield {} created", reference);
        self.references.insert(bits.to_string(), reference);
        Ok(reference)
    }

    /// Number of distinct bit strings encoded
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether nothing was encoded yet
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
