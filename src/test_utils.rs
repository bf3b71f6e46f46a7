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

use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use tempfile::TempDir;

pub fn get_file_content<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let mut output_file = File::open(path).unwrap_or_else(|_| panic!("file {:?} not found", path));
    let mut output_contents = String::new();
    output_file.read_to_string(&mut output_contents).unwrap();

    output_contents
}

/// HRDF records end with a lone carriage return, which makes diffs
/// unreadable; compare line by line instead.
pub fn get_records<P: AsRef<Path>>(path: P) -> Vec<String> {
    get_file_content(path)
        .split_terminator('\r')
        .map(str::to_string)
        .collect()
}

pub fn compare_output_dir_with_expected<P: AsRef<Path>>(
    output_dir: &P,
    files_to_check: Option<Vec<&str>>,
    work_dir_expected: &str,
) {
    let output_dir = output_dir.as_ref();
    let files_to_check: Vec<String> = match files_to_check {
        Some(files) => files.iter().map(|f| f.to_string()).collect(),
        None => std::fs::read_dir(work_dir_expected)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
    };
    for filename in files_to_check {
        let output_records = get_records(output_dir.join(&filename));
        let expected_records = get_records(Path::new(work_dir_expected).join(&filename));

        assert_eq!(expected_records, output_records, "mismatch in {}", filename);
    }
}

pub fn create_file_with_content(path: &Path, file_name: &str, content: &str) -> File {
    let file_path = path.join(file_name);
    let mut f = File::create(&file_path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    File::open(file_path).unwrap()
}

pub fn test_in_tmp_dir<F>(func: F)
where
    F: FnOnce(&Path),
{
    let tmp_dir = TempDir::new().expect("create temp dir");
    {
        let path = tmp_dir.path();
        func(path);
    }
    tmp_dir.close().expect("delete temp dir");
}
