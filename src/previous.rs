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

//! Bookkeeping of the last converted NeTEx document.
//!
//! The folder keeps a single file: the document of the last successful run.
//! A new delivery with the same file name is considered already converted.

use crate::Result;
use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The folder remembering the previous input
#[derive(Debug)]
pub struct PreviousInput {
    folder: PathBuf,
    file_name: Option<String>,
}

impl PreviousInput {
    /// Open the bookkeeping folder, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(folder: P) -> Result<Self> {
        let folder = folder.as_ref().to_path_buf();
        if !folder.is_dir() {
            info!("Creating folder {:?} for the previous input", folder);
            fs::create_dir_all(&folder)
                .with_context(|| format!("Error creating folder {:?}", folder))?;
        }
        let mut file_name = None;
        for entry in fs::read_dir(&folder)? {
            file_name = Some(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(PreviousInput { folder, file_name })
    }

    /// Name of the last converted document, if any
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Whether `document` has the same name as the last converted document
    pub fn is_already_converted(&self, document: &Path) -> bool {
        match (self.file_name(), document.file_name()) {
            (Some(previous), Some(current)) => previous == current.to_string_lossy(),
            _ => false,
        }
    }

    /// Replace the remembered document by `document`, which is moved into
    /// the folder.
    pub fn replace_with(&mut self, document: &Path) -> Result<()> {
        if !document.is_file() {
            bail!("Was not a file path: {:?}", document);
        }
        let file_name = match document.file_name() {
            Some(file_name) => file_name.to_owned(),
            None => bail!("Was not a file path: {:?}", document),
        };
        if let Some(previous) = self.file_name.take() {
            fs::remove_file(self.folder.join(previous))?;
        }
        let destination = self.folder.join(&file_name);
        move_file(document, &destination)?;
        info!("File moved from {:?} to {:?}", document, destination);
        self.file_name = Some(file_name.to_string_lossy().into_owned());
        Ok(())
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    // `rename` fails across file systems
    if fs::rename(from, to).is_err() {
        fs::copy(from, to).with_context(|| format!("Error copying {:?} to {:?}", from, to))?;
        fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_run_creates_folder() {
        test_in_tmp_dir(|path| {
            let previous = PreviousInput::open(path.join("previous")).unwrap();
            assert!(path.join("previous").is_dir());
            assert_eq!(None, previous.file_name());
            assert!(!previous.is_already_converted(&path.join("netex.xml")));
        });
    }

    #[test]
    fn replace_previous_document() {
        test_in_tmp_dir(|path| {
            let input = path.join("input");
            fs::create_dir_all(&input).unwrap();
            create_file_with_content(&input, "netex_1.xml", "1");
            create_file_with_content(&input, "netex_2.xml", "2");

            let mut previous = PreviousInput::open(path.join("previous")).unwrap();
            previous.replace_with(&input.join("netex_1.xml")).unwrap();
            assert_eq!(Some("netex_1.xml"), previous.file_name());
            assert!(!input.join("netex_1.xml").exists());

            let mut previous = PreviousInput::open(path.join("previous")).unwrap();
            assert!(previous.is_already_converted(Path::new("elsewhere/netex_1.xml")));
            previous.replace_with(&input.join("netex_2.xml")).unwrap();
            assert!(!path.join("previous").join("netex_1.xml").exists());
            assert_eq!(
                "2",
                get_file_content(path.join("previous").join("netex_2.xml"))
            );
        });
    }
}
