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

//! Upload of the HRDF archive to an FTPS or SFTP server.

use anyhow::{anyhow, bail, Context};
use odv_hrdf::{Error, Result};
use ssh2::Session;
use std::fmt;
use std::fs::File;
use std::io;
use std::net::TcpStream;
use std::path::Path;
use std::str::FromStr;
use suppaftp::{
    native_tls::TlsConnector, types::FileType, NativeTlsConnector, NativeTlsFtpStream,
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Ftps,
    Sftp,
}

impl Protocol {
    fn default_port(self) -> u16 {
        match self {
            Protocol::Ftps => 21,
            Protocol::Sftp => 22,
        }
    }
}

/// Where to upload the archive, given on the command line as
/// `<protocol>://<host>[:<port>],<user>,<password>,<path>`
#[derive(Clone, PartialEq)]
pub struct FtpTarget {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Remote directory, always ending with '/'
    pub path: String,
}

impl fmt::Debug for FtpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpTarget")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FromStr for FtpTarget {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parameters: Vec<&str> = value.split(',').map(str::trim).collect();
        let (url, user, password, path) = match parameters.as_slice() {
            [url, user, password, path] => (*url, *user, *password, *path),
            _ => bail!("Expected 'url,user,password,path', got {} value(s)", parameters.len()),
        };

        let (scheme, address) = url
            .split_once("://")
            .ok_or_else(|| anyhow!("No protocol in '{}'", url))?;
        let protocol = match scheme.to_lowercase().as_str() {
            "ftps" => Protocol::Ftps,
            "sftp" => Protocol::Sftp,
            _ => bail!("Unsupported protocol: {}", scheme),
        };
        let (host, port) = match address.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .with_context(|| format!("Invalid port '{}' in '{}'", port, url))?;
                (host, port)
            }
            None => (address, protocol.default_port()),
        };
        if host.is_empty() {
            bail!("No host in '{}'", url);
        }

        let mut path = path.to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        Ok(FtpTarget {
            protocol,
            host: host.to_string(),
            port,
            user: user.to_string(),
            password: password.to_string(),
            path,
        })
    }
}

impl FtpTarget {
    /// Remote location of `file`, keeping its file name
    fn remote_path(&self, file: &Path) -> Result<String> {
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("No file name in {:?}", file))?;
        Ok(format!("{}{}", self.path, file_name))
    }

    /// Upload `file` into the remote directory
    pub fn upload(&self, file: &Path) -> Result<()> {
        let remote_path = self.remote_path(file)?;
        let uploaded = match self.protocol {
            Protocol::Ftps => self.upload_ftps(file, &remote_path),
            Protocol::Sftp => self.upload_sftp(file, &remote_path),
        };
        uploaded
            .with_context(|| format!("Error uploading {:?} to {}:{}", file, self.host, self.port))?;
        info!("Uploaded {:?} to '{}' via {:?}", file, remote_path, self.protocol);
        Ok(())
    }

    fn upload_ftps(&self, file: &Path, remote_path: &str) -> Result<()> {
        let stream = NativeTlsFtpStream::connect((self.host.as_str(), self.port))?;
        // AUTH TLS then a protected data channel
        let mut stream =
            stream.into_secure(NativeTlsConnector::from(TlsConnector::new()?), &self.host)?;
        stream.login(&self.user, &self.password)?;
        stream.transfer_type(FileType::Binary)?;
        let mut reader = File::open(file)?;
        stream.put_file(remote_path, &mut reader)?;
        stream.quit()?;
        Ok(())
    }

    fn upload_sftp(&self, file: &Path, remote_path: &str) -> Result<()> {
        let mut session = Session::new()?;
        session.set_tcp_stream(TcpStream::connect((self.host.as_str(), self.port))?);
        session.handshake()?;
        session.userauth_password(&self.user, &self.password)?;
        let sftp = session.sftp()?;
        let mut writer = sftp.create(Path::new(remote_path))?;
        let mut reader = File::open(file)?;
        io::copy(&mut reader, &mut writer)?;
        Ok(())
    }
}
