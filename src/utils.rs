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

use anyhow::Context;
use std::fs;
use std::io::{Read, Write};
use std::path;
use tracing::debug;
use walkdir::WalkDir;

macro_rules! ctx_from_path {
    ($path:expr) => {
        || format!("Error reading {:?}", $path)
    };
}

macro_rules! skip_fail {
    ($res:expr) => {{
        use tracing::warn;
        match $res {
            Ok(val) => val,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        }
    }};
}

/// Zip every file found under `source_path` into `zip_file`, names being
/// relative to `source_path`.
pub fn zip_to<P, R>(source_path: P, zip_file: R) -> crate::Result<()>
where
    P: AsRef<path::Path>,
    R: AsRef<path::Path>,
{
    let source_path = source_path.as_ref();
    let zip_file = zip_file.as_ref();
    let file = fs::File::create(zip_file).with_context(ctx_from_path!(zip_file))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    let mut buffer = Vec::new();
    for entry in WalkDir::new(source_path) {
        let path = entry?.path().to_owned();
        if path.is_file() {
            let name = path.strip_prefix(source_path)?.to_owned();
            if let Some(name) = name.to_str() {
                debug!("adding {:?} as {:?} ...", path, name);
                zip.start_file(name, options)?;
                let mut f = fs::File::open(&path)?;

                f.read_to_end(&mut buffer)?;
                zip.write_all(&buffer)?;
                buffer.clear();
            }
        }
    }
    zip.finish()?;
    Ok(())
}

/// Extract all the files of `zip_file` into `output_folder`, which is
/// created if needed.
pub fn unzip_to<P, R>(zip_file: P, output_folder: R) -> crate::Result<()>
where
    P: AsRef<path::Path>,
    R: AsRef<path::Path>,
{
    let zip_file = zip_file.as_ref();
    fs::create_dir_all(output_folder.as_ref())?;
    let file = fs::File::open(zip_file).with_context(ctx_from_path!(zip_file))?;
    let mut archive = zip::ZipArchive::new(file)?;
    archive.extract(output_folder.as_ref())?;
    Ok(())
}
