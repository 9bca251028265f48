// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsed store locations.
//!
//! A location is a URL of the form `scheme://authority/path`. The scheme picks
//! the backend; what the authority and path mean is up to that backend (a file
//! path, a `host:port` plus key name, a named in-memory document, ...).

use crate::domain::errors::{KvError, Result};
use std::fmt;
use std::path::PathBuf;
use url::{Position, Url};

/// A store location, parsed once and immutable afterwards.
///
/// # Examples
///
/// ```
/// use hexkv::domain::StoreLocation;
///
/// let location = StoreLocation::parse("redis://127.0.0.1:6379/app-config").unwrap();
/// assert_eq!(location.scheme(), "redis");
/// assert_eq!(location.loc(), "127.0.0.1:6379");
/// assert_eq!(location.path(), "/app-config");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreLocation {
    url: Url,
}

impl StoreLocation {
    /// Parses a location URL.
    ///
    /// Fails with [`KvError::InvalidArguments`] when `url` is not a URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| {
            KvError::invalid_arguments(format!("Invalid store location '{}': {}", url, e))
        })?;
        Ok(Self { url })
    }

    /// Returns the scheme, which selects the backend.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the authority: userinfo, host and port as written, or `""`.
    pub fn loc(&self) -> &str {
        &self.url[Position::BeforeUsername..Position::AfterPort]
    }

    /// Returns the path component as written in the URL.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Returns the underlying URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Interprets the location as a filesystem path.
    ///
    /// `json:///etc/app.json` names the absolute path `/etc/app.json` (percent
    /// escapes decoded); `json://conf/app.json` names the relative path
    /// `conf/app.json`.
    pub fn file_path(&self) -> PathBuf {
        if self.loc().is_empty() {
            Url::parse(&format!("file://{}", self.path()))
                .ok()
                .and_then(|file_url| file_url.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(self.path()))
        } else {
            PathBuf::from(format!("{}{}", self.loc(), self.path()))
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
