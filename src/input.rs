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

//! Location of the NeTEx document to convert.

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with the content of the input folder. They are raised before
/// anything is written, and can be told apart from other failures with
/// `anyhow::Error::downcast_ref`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The input folder is empty
    #[error("no NeTEx document found in {0:?}")]
    NoInputDocument(PathBuf),
    /// The input folder holds more than one entry
    #[error("more than one NeTEx document delivered in {0:?}")]
    MultipleInputDocuments(PathBuf),
    /// The only entry of the input folder is not a file
    #[error("{0:?} is not a file")]
    NotAFile(PathBuf),
}

/// The path of the only document of `folder`.
pub fn find_single_document<P: AsRef<Path>>(folder: P) -> Result<PathBuf> {
    let folder = folder.as_ref();
    let mut entries = fs::read_dir(folder)
        .with_context(|| format!("Error reading input folder {:?}", folder))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if entries.len() > 1 {
        return Err(InputError::MultipleInputDocuments(folder.to_path_buf()).into());
    }
    let path = entries
        .pop()
        .map(|entry| entry.path())
        .ok_or_else(|| InputError::NoInputDocument(folder.to_path_buf()))?;
    if !path.is_file() {
        return Err(InputError::NotAFile(path).into());
    }
    Ok(path)
}
