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

use crate::Result;
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Terminator of every HRDF record
const RECORD_TERMINATOR: &str = "\r";

/// The output channels of an HRDF bundle, one file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HrdfFile {
    /// Timetable
    Fplan,
    /// Categories of service
    Zugart,
    /// Attribute catalog
    Attribut,
    /// Notes
    Infotext,
    /// Service areas
    Region,
    /// Stops
    Bahnhof,
    /// Stop coordinates
    Bfkoord,
    /// Stop access
    Bhfart,
    /// Calendars
    Bitfeld,
    /// Timetable period
    Eckdaten,
}

impl HrdfFile {
    /// Every channel, in creation order
    pub const ALL: [HrdfFile; 10] = [
        HrdfFile::Fplan,
        HrdfFile::Zugart,
        HrdfFile::Attribut,
        HrdfFile::Infotext,
        HrdfFile::Region,
        HrdfFile::Bahnhof,
        HrdfFile::Bfkoord,
        HrdfFile::Bhfart,
        HrdfFile::Bitfeld,
        HrdfFile::Eckdaten,
    ];

    /// Name of the file in the bundle
    pub fn file_name(self) -> &'static str {
        match self {
            HrdfFile::Fplan => "fplan",
            HrdfFile::Zugart => "zugart",
            HrdfFile::Attribut => "attribut",
            HrdfFile::Infotext => "infotext",
            HrdfFile::Region => "region",
            HrdfFile::Bahnhof => "bahnhof",
            HrdfFile::Bfkoord => "bfkoord",
            HrdfFile::Bhfart => "bhfart",
            HrdfFile::Bitfeld => "bitfeld",
            HrdfFile::Eckdaten => "eckdaten",
        }
    }

    /// First record of the file, identifying its kind
    pub fn header(self) -> &'static str {
        match self {
            HrdfFile::Fplan => "*F 03 1",
            HrdfFile::Zugart => "*F 06 1",
            HrdfFile::Attribut => "*F 09 1",
            HrdfFile::Infotext => "*F 11 1",
            HrdfFile::Region => "*F 45 1",
            HrdfFile::Bahnhof => "*F 01 1",
            HrdfFile::Bfkoord => "*F 02 1",
            HrdfFile::Bhfart => "*F 30 1",
            HrdfFile::Bitfeld => "*F 05 1",
            HrdfFile::Eckdaten => "*F 04 1",
        }
    }
}

impl Display for HrdfFile {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

impl FromStr for HrdfFile {
    type Err = crate::Error;
    fn from_str(file_name: &str) -> Result<Self> {
        HrdfFile::ALL
            .iter()
            .copied()
            .find(|file| file.file_name() == file_name)
            .ok_or_else(|| anyhow!("{} is not a known HRDF file", file_name))
    }
}

/// Append-only writer of the HRDF channels of a folder
pub struct HrdfWriter {
    folder: PathBuf,
    files: BTreeMap<HrdfFile, BufWriter<File>>,
}

impl HrdfWriter {
    /// Create the folder if needed, then every channel with its header.
    /// Existing channels are truncated.
    pub fn create<P: AsRef<Path>>(folder: P) -> Result<Self> {
        let folder = folder.as_ref().to_path_buf();
        fs::create_dir_all(&folder)
            .with_context(|| format!("Error creating folder {:?}", folder))?;
        let mut writer = HrdfWriter {
            folder,
            files: BTreeMap::new(),
        };
        for file in HrdfFile::ALL.iter().copied() {
            let handle = writer.create_file(file)?;
            writer.files.insert(file, handle);
            writer.write(file, file.header())?;
        }
        info!("HRDF files initiated in {:?}", writer.folder);
        Ok(writer)
    }

    fn create_file(&self, file: HrdfFile) -> Result<BufWriter<File>> {
        let path = self.folder.join(file.file_name());
        let handle = File::create(&path).with_context(|| format!("Error creating {:?}", path))?;
        Ok(BufWriter::new(handle))
    }

    /// Append one record to `file`
    pub fn write(&mut self, file: HrdfFile, record: &str) -> Result<()> {
        let handle = self
            .files
            .get_mut(&file)
            .ok_or_else(|| anyhow!("{} is not open for writing", file))?;
        handle.write_all(record.as_bytes())?;
        handle.write_all(RECORD_TERMINATOR.as_bytes())?;
        Ok(())
    }

    /// Append an empty record to `file`
    pub fn write_blank(&mut self, file: HrdfFile) -> Result<()> {
        self.write(file, "")
    }

    /// Replace the whole content of `file`, header included, by the content
    /// of `seed`. A missing seed keeps the header only.
    pub fn seed_from(&mut self, file: HrdfFile, seed: &Path) -> Result<()> {
        if !seed.is_file() {
            warn!("{:?} not found, {} only holds its header", seed, file);
            return Ok(());
        }
        if let Some(mut header_only) = self.files.remove(&file) {
            header_only.flush()?;
        }
        let mut handle = self.create_file(file)?;
        let mut source = File::open(seed).with_context(ctx_from_path!(seed))?;
        io::copy(&mut source, &mut handle).with_context(ctx_from_path!(seed))?;
        self.files.insert(file, handle);
        info!("{} copied from {:?}", file, seed);
        Ok(())
    }

    /// Flush every channel
    pub fn finish(mut self) -> Result<()> {
        for (file, handle) in self.files.iter_mut() {
            handle
                .flush()
                .with_context(|| format!("Error writing {}", file))?;
        }
        info!("HRDF files written in {:?}", self.folder);
        Ok(())
    }
}
