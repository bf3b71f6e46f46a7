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

mod upload;

use anyhow::{anyhow, Context};
use clap::Parser;
use odv_hrdf::{
    configuration::{parse_offers, read_config},
    input::find_single_document,
    previous::PreviousInput,
    Result,
};
use reqwest::header;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};
use upload::FtpTarget;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

const DEFAULT_URL: &str = "https://data.opentransportdata.swiss/dataset/netex_tt_odv/permalink";
const DEFAULT_ATTRIBUTE_CATALOG: &str = "resources/attribut";

lazy_static::lazy_static! {
    pub static ref GIT_VERSION: String = odv_hrdf::binary_full_version(env!("CARGO_PKG_VERSION"));
    static ref DEFAULT_ZIP: String = format!("{}_hrdf_odv.zip", chrono::Local::now().format("%Y-%m-%d"));
}

fn get_version() -> &'static str {
    &GIT_VERSION
}

#[derive(Debug, Parser)]
#[command(
    name = "netex2hrdf",
    about = "Convert the on-demand offers of a NeTEx document into HRDF.",
    version = get_version()
)]
struct Opt {
    /// Input directory, holding exactly one NeTEx document. When missing,
    /// the document is downloaded from '--url'.
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Where to download the NeTEx document from.
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Output directory of the HRDF files.
    #[arg(short = 'o', long = "output", default_value = "output")]
    output: PathBuf,

    /// Comma-separated names of the flexible lines to convert, all of them
    /// when empty.
    #[arg(long)]
    offers: Option<String>,

    /// Directory remembering the last converted document.
    #[arg(long, default_value = "previous")]
    previous: PathBuf,

    /// Path of the resulting HRDF archive.
    #[arg(long, default_value = &**DEFAULT_ZIP)]
    zip: PathBuf,

    /// Catalog copied as the ATTRIBUT file [default: resources/attribut]
    #[arg(long)]
    attribute_catalog: Option<PathBuf>,

    /// JSON configuration file, command line arguments take precedence.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Keep the output directory once zipped.
    #[arg(long)]
    keep_output: bool,

    /// Server to upload the archive to, as 'url,user,password,path' with an
    /// 'ftps://' or 'sftp://' url and an optional port. The local archive is
    /// removed once uploaded.
    #[arg(long)]
    ftp: Option<FtpTarget>,
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter_subscriber = EnvFilter::try_new(rust_log).unwrap_or_else(|e| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            e,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter_subscriber)
        .init();
}

/// File name announced by a `Content-Disposition` header value
fn disposition_file_name(content_disposition: &str) -> Option<String> {
    content_disposition
        .split(';')
        .map(str::trim)
        .find_map(|parameter| parameter.strip_prefix("filename="))
        .map(|file_name| file_name.trim_matches('"').to_string())
        .filter(|file_name| !file_name.is_empty())
}

/// Download the document published at `url` into a temporary directory,
/// extracting it when it comes as a ZIP archive.
fn download(url: &str) -> Result<TempDir> {
    let folder = TempDir::new()?;
    info!("Downloading {}", url);
    let mut response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Error downloading {}", url))?;
    let file_name = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(disposition_file_name)
        .ok_or_else(|| anyhow!("No file name announced when downloading {}", url))?;
    let path = folder.path().join(&file_name);
    let mut file = File::create(&path).with_context(|| format!("Error creating {:?}", path))?;
    response.copy_to(&mut file)?;
    info!("Downloaded {}", file_name);

    if path.extension().map_or(false, |extension| extension == "zip") {
        odv_hrdf::unzip_to(&path, folder.path())?;
        fs::remove_file(&path)?;
    }
    Ok(folder)
}

fn run(opt: Opt) -> Result<()> {
    info!("Launching netex2hrdf...");

    let configuration = read_config(opt.config.as_ref())?;
    let offers = match &opt.offers {
        Some(offers) => parse_offers(offers),
        None => configuration.offers,
    };
    let attribute_catalog = opt
        .attribute_catalog
        .clone()
        .or(configuration.attribute_catalog)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ATTRIBUTE_CATALOG));

    // Removed on drop, whatever the outcome of the conversion
    let download_folder;
    let input_folder: &Path = match &opt.input {
        Some(input) => input,
        None => {
            download_folder = download(&opt.url)?;
            download_folder.path()
        }
    };

    let document = find_single_document(input_folder)?;
    let mut previous = PreviousInput::open(&opt.previous)?;
    if previous.is_already_converted(&document) {
        warn!("Already loaded: {:?}", document);
        return Ok(());
    }

    odv_hrdf::convert(input_folder, &opt.output, &offers, Some(attribute_catalog.as_path()))?;
    odv_hrdf::zip_to(&opt.output, &opt.zip)?;
    info!("HRDF archive {:?} created", opt.zip);
    match &opt.ftp {
        Some(target) => {
            target.upload(&opt.zip)?;
            fs::remove_file(&opt.zip)
                .with_context(|| format!("Error removing {:?}", opt.zip))?;
        }
        None => info!("No FTP given, the HRDF archive stays local"),
    }
    previous.replace_with(&document)?;
    if !opt.keep_output {
        fs::remove_dir_all(&opt.output)
            .with_context(|| format!("Error removing {:?}", opt.output))?;
    }
    Ok(())
}

fn main() {
    init_logger();
    if let Err(err) = run(Opt::parse()) {
        for cause in err.chain() {
            eprintln!("{cause}");
        }
        std::process::exit(1);
    }
}
