//! JSON document persistence
//!
//! Reads and writes the whole link collection as one JSON array.
//! Uses atomic writes (write to a uniquely named temp file, then rename) so
//! a load never observes a half-written document and concurrent writers
//! never share a temp file.
//!
//! Storage location: `~/.local/share/linkhub/links.json` (configurable via `Config`)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{seed_links, Link};
use crate::storage::error::{StorageError, StorageResult};

/// Suffix of the copy kept when the document cannot be parsed
const CORRUPT_BACKUP_SUFFIX: &str = "corrupt.backup";

/// Persistence adapter for the link collection
///
/// Holds no data itself: every `load` reads the file and every `save`
/// replaces it.
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a persistence handler for the configured data file
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_file.clone())
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Path used for the copy of an unparseable document
    pub fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(CORRUPT_BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Write the seed collection if no document exists yet
    ///
    /// Returns the seeded links, or `None` when a document was already there.
    pub fn seed_if_missing(&self) -> StorageResult<Option<Vec<Link>>> {
        if self.exists() {
            return Ok(None);
        }
        let seed = seed_links(Utc::now());
        self.save(&seed)?;
        debug!("Seeded {:?} with {} links", self.path, seed.len());
        Ok(Some(seed))
    }

    /// Load the full collection
    ///
    /// - Missing document: the seed collection is written first and returned.
    /// - Unreadable document (permissions, a directory in its place): an
    ///   empty collection is returned and a warning is logged.
    /// - Unparseable document: an empty collection is returned. The file is
    ///   also copied to `corrupt_backup_path()`.
    pub fn load(&self) -> StorageResult<Vec<Link>> {
        if let Some(seed) = self.seed_if_missing()? {
            return Ok(seed);
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Data file {:?} could not be read ({}); serving an empty collection",
                    self.path, e
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Link>>(&content) {
            Ok(links) => {
                debug!("Loaded {} links from {:?}", links.len(), self.path);
                Ok(links)
            }
            Err(e) => {
                self.degrade_corrupt(&e);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the document with `links`
    pub fn save(&self, links: &[Link]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(links).map_err(|source| StorageError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} links to {:?}", links.len(), self.path);
        Ok(())
    }

    /// Log an unparseable document and keep a copy of it
    fn degrade_corrupt(&self, error: &serde_json::Error) {
        let backup = self.corrupt_backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => warn!(
                "Data file {:?} is corrupted ({}); serving an empty collection. Backup written to {:?}",
                self.path, error, backup
            ),
            Err(copy_err) => warn!(
                "Data file {:?} is corrupted ({}); serving an empty collection. Backup to {:?} failed: {}",
                self.path, error, backup, copy_err
            ),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a uniquely named temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
            parent
        }
        None => Path::new("."),
    };

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| StorageError::from_io(e, dir.to_path_buf()))?;
    let temp_path = temp_file.path().to_path_buf();

    temp_file
        .write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    temp_file
        .persist(path)
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path,
            to: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}
