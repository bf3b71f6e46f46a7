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

use super::Descendants;
use crate::Result;
use anyhow::{anyhow, Context};
use minidom::Element;
use std::str::FromStr;

/// Attribute lookups of an [Element](minidom::Element)
pub trait TryAttribute {
    /// Parse the attribute `attr_name`, failing when it is missing or does
    /// not convert to `F`
    fn try_attribute<F>(&self, attr_name: &str) -> Result<F>
    where
        F: FromStr;

    /// The attribute `attr_name`, when present and convertible
    fn attribute<F>(&self, attr_name: &str) -> Option<F>
    where
        F: FromStr,
    {
        self.try_attribute(attr_name).ok()
    }

    /// The target of the first `<ref_name ref="..."/>` below the element, as
    /// NeTEx links its objects
    fn try_reference(&self, ref_name: &str) -> Result<String>;
}

impl TryAttribute for Element {
    fn try_attribute<F>(&self, attr_name: &str) -> Result<F>
    where
        F: FromStr,
    {
        let value = self.attr(attr_name).ok_or_else(|| {
            anyhow!(
                "Failed to find attribute '{}' in element '{}'",
                attr_name,
                self.name()
            )
        })?;
        value
            .parse()
            .map_err(|_| anyhow!("Failed to parse and convert '{}'", value))
    }

    fn try_reference(&self, ref_name: &str) -> Result<String> {
        self.try_descendant(ref_name)?
            .try_attribute("ref")
            .with_context(|| format!("'{}' points to nothing", ref_name))
    }
}
