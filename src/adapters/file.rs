// SPDX-License-Identifier: MIT OR Apache-2.0

//! File backend shared by every text format.
//!
//! [`FileBackend`] handles reading, size limits and atomic replacement; the
//! [`DocumentCodec`] type parameter supplies the format. `json://` and
//! `yaml://` are both this backend with a different codec.

use crate::domain::{Document, KvError, Result, StoreLocation};
use crate::ports::{BackendFactory, DocumentCodec, KvBackend};
use directories::ProjectDirs;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum allowed size of a configuration file (10MB).
/// Larger files are refused rather than read into memory.
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Backend storing a document in a single file.
///
/// # Missing files
///
/// `load` treats a file that does not exist as an empty document, so a store
/// can be pointed at a path before anything has been written there. Any other
/// I/O failure, a file larger than 10MB, or contents the codec rejects fail
/// with [`KvError::BackendUnavailable`].
///
/// # Atomic writes
///
/// `dump` writes to a temporary file in the target's directory, syncs it, and
/// renames it over the target. Readers see either the old document or the new
/// one, never a truncated file.
///
/// # Examples
///
/// ```rust,no_run
/// use hexkv::adapters::JsonFileBackend;
/// use hexkv::ports::KvBackend;
///
/// let backend = JsonFileBackend::from_file("/etc/myapp/config.json");
/// let document = backend.load().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend<C: DocumentCodec> {
    /// Path to the file
    file_path: PathBuf,
    /// Text format of the file
    codec: C,
}

impl<C: DocumentCodec> FileBackend<C> {
    /// Creates a backend for the file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            codec: C::default(),
        }
    }

    /// Returns the path to the file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn display_name(&self) -> String {
        self.file_path.display().to_string()
    }

    fn read_contents(&self) -> Result<Option<String>> {
        let metadata = match fs::metadata(&self.file_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(KvError::backend(
                    C::SCHEME,
                    format!("Failed to read file metadata: {}", self.display_name()),
                    e,
                ))
            }
        };

        if metadata.len() > MAX_FILE_SIZE {
            return Err(KvError::backend_msg(
                C::SCHEME,
                format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
            ));
        }

        match fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::backend(
                C::SCHEME,
                format!("Failed to read configuration file: {}", self.display_name()),
                e,
            )),
        }
    }

    fn write_atomically(&self, content: &str) -> io::Result<()> {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.file_path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl<C: DocumentCodec> KvBackend for FileBackend<C> {
    fn name(&self) -> &str {
        C::SCHEME
    }

    fn load(&self) -> Result<Document> {
        match self.read_contents()? {
            Some(content) => {
                let document = self.codec.decode(&content).map_err(|e| {
                    KvError::backend(
                        C::SCHEME,
                        format!("Malformed configuration file: {}", self.display_name()),
                        e,
                    )
                })?;
                tracing::debug!("Loaded {}", self.display_name());
                Ok(document)
            }
            None => {
                tracing::debug!(
                    "{} does not exist yet, starting from an empty document",
                    self.display_name()
                );
                Ok(Document::new())
            }
        }
    }

    fn dump(&self, document: &Document) -> Result<()> {
        let content = self.codec.encode(document)?;
        self.write_atomically(&content).map_err(|e| {
            KvError::backend(
                C::SCHEME,
                format!("Failed to write configuration file: {}", self.display_name()),
                e,
            )
        })?;
        tracing::debug!("Dumped {} bytes to {}", content.len(), self.display_name());
        Ok(())
    }
}

impl<C: DocumentCodec> BackendFactory for FileBackend<C> {
    const SCHEME: &'static str = C::SCHEME;

    fn open(location: &StoreLocation) -> Result<Self> {
        let unnamed = location.loc().is_empty() && location.path().is_empty();
        if unnamed || location.path().ends_with('/') {
            return Err(KvError::invalid_arguments(format!(
                "Store location '{}' does not name a file",
                location
            )));
        }
        Ok(Self::from_file(location.file_path()))
    }
}

/// Builds a location URL for `file_name` in the OS-appropriate configuration
/// directory of an application.
///
/// # Arguments
///
/// * `scheme` - The file backend scheme (e.g., `"yaml"`)
/// * `app_name` - The application name (e.g., `"myapp"`)
/// * `qualifier` - The organization/qualifier (e.g., `"com.example"`)
/// * `file_name` - The configuration file name (e.g., `"config.yaml"`)
///
/// # Examples
///
/// ```rust,no_run
/// use hexkv::adapters::default_config_url;
///
/// let url = default_config_url("yaml", "myapp", "com.example", "config.yaml").unwrap();
/// assert!(url.starts_with("yaml:///"));
/// ```
pub fn default_config_url(
    scheme: &str,
    app_name: &str,
    qualifier: &str,
    file_name: &str,
) -> Result<String> {
    let proj_dirs =
        ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| KvError::InvalidConfiguration {
            scheme: scheme.to_string(),
            reason: "Failed to determine project directories".to_string(),
        })?;

    let config_file = proj_dirs.config_dir().join(file_name);
    let file_url = url::Url::from_file_path(&config_file).map_err(|()| {
        KvError::InvalidConfiguration {
            scheme: scheme.to_string(),
            reason: format!("Not an absolute path: {}", config_file.display()),
        }
    })?;

    Ok(format!("{}://{}", scheme, &file_url[url::Position::BeforePath..]))
}
