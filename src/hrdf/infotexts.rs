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
use crate::objects::FlexibleLine;
use crate::Result;
use anyhow::anyhow;

/// What the booking arrangements of a line turn into on its trips
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineAnnotations {
    /// ATTRIBUT codes, in booking arrangement order
    pub attribute_codes: Vec<String>,
    /// INFOTEXT numbers, in booking arrangement order
    pub infotext_ids: Vec<u32>,
}

/// The attribute code carried by a booking arrangement identifier: the
/// part of its last `:` segment before the first `_`.
///
/// ```
/// # use odv_hrdf::hrdf::attribute_code;
/// assert_eq!(Some("VR"), attribute_code("ch:1:BookingArrangement:VR_1"));
/// assert_eq!(None, attribute_code("ch:1:BookingArrangement:_1"));
/// ```
pub fn attribute_code(booking_arrangement_id: &str) -> Option<&str> {
    booking_arrangement_id
        .rsplit(':')
        .next()
        .and_then(|last_segment| last_segment.split('_').next())
        .filter(|code| !code.is_empty())
}

/// Split the booking arrangements of `line` into attribute codes and
/// notes. Notes are written to INFOTEXT under a header naming the line.
pub fn resolve(
    line: &FlexibleLine,
    ids: &mut IdAllocator,
    writer: &mut HrdfWriter,
) -> Result<LineAnnotations> {
    let mut annotations = LineAnnotations::default();
    writer.write(HrdfFile::Infotext, &format!("% {}", line.name))?;
    for booking_arrangement in &line.booking_arrangements {
        if let Some(code) = attribute_code(&booking_arrangement.id) {
            annotations.attribute_codes.push(code.to_string());
            continue;
        }
        let note = booking_arrangement.booking_note.as_ref().ok_or_else(|| {
            anyhow!(
                "BookingArrangement '{}' of FlexibleLine '{}' has no attribute code and no BookingNote",
                booking_arrangement.id,
                line.id
            )
        })?;
        let infotext_id = ids.allocate();
        writer.write(HrdfFile::Infotext, &format!("{} {}", infotext_id, note))?;
        annotations.infotext_ids.push(infotext_id);
    }
    writer.write_blank(HrdfFile::Infotext)?;
    Ok(annotations)
}
