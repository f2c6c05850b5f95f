//! Link store
//!
//! The `Store` exposes list/find/add/delete over the link collection.
//!
//! ## No cache
//!
//! The store holds no copy of the collection. Every operation reloads the
//! JSON document first, so a write is visible to the next read, including
//! reads through another `Store` opened on the same file.
//!
//! ## Writers
//!
//! `add` and `delete_by_id` hold a writer lock for their whole
//! load-modify-save cycle. Seeding a missing document on first read takes
//! the same lock. Writers sharing one `Store` are serialized; separate
//! processes writing the same file are not.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open_with_config(Config::load()?);
//!
//! let link = store.add(NewLink::new("Docs", "docs.rs"))?;
//! let found = store.find_by_id(link.id)?;
//! store.delete_by_id(link.id)?;
//! ```

use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

use crate::config::Config;
use crate::error::{LinkHubError, Result};
use crate::models::{Link, NewLink};
use crate::storage::JsonPersistence;

/// Link store backed by a JSON document
pub struct Store {
    /// Persistence adapter (owns the durable copy)
    persistence: JsonPersistence,
    /// Serializes load-modify-save cycles
    write_lock: Mutex<()>,
    /// Configuration (admin secret)
    config: Config,
}

impl Store {
    /// Open the store with a specific configuration
    ///
    /// Nothing is read here; the document is seeded on the first operation.
    pub fn open_with_config(config: Config) -> Self {
        Self {
            persistence: JsonPersistence::from_config(&config),
            write_lock: Mutex::new(()),
            config,
        }
    }

    /// Path of the JSON document
    pub fn data_file(&self) -> &Path {
        self.persistence.path()
    }

    /// Check a caller-supplied admin secret
    pub fn authorize(&self, secret: &str) -> Result<()> {
        if secret == self.config.admin_password {
            Ok(())
        } else {
            Err(LinkHubError::Forbidden)
        }
    }

    // ==================== Reads ====================

    /// All links in insertion order
    pub fn list(&self) -> Result<Vec<Link>> {
        if !self.persistence.exists() {
            let _guard = self.write_lock.lock();
            if let Some(seed) = self.persistence.seed_if_missing()? {
                return Ok(seed);
            }
        }
        Ok(self.persistence.load()?)
    }

    /// Get a link by id
    pub fn find_by_id(&self, id: u64) -> Result<Link> {
        self.list()?
            .into_iter()
            .find(|link| link.id == id)
            .ok_or(LinkHubError::NotFound { id })
    }

    /// Next id for `links`: one past the largest id, or 1 when empty
    pub fn next_id(links: &[Link]) -> u64 {
        links.iter().map(|link| link.id).max().map_or(1, |max| max + 1)
    }

    // ==================== Writes ====================

    /// Validate and append a new link, then persist the collection
    pub fn add(&self, new: NewLink) -> Result<Link> {
        let new = new.validate()?;

        let _guard = self.write_lock.lock();
        let mut links = self.persistence.load()?;
        let link = Link::from_new(Self::next_id(&links), new, Utc::now());
        links.push(link.clone());
        self.persistence.save(&links)?;

        info!("Added link {} ({})", link.id, link.url);
        Ok(link)
    }

    /// Remove the link with `id`, if present, then persist the collection
    ///
    /// An unknown id is not an error.
    pub fn delete_by_id(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut links = self.persistence.load()?;
        let before = links.len();
        links.retain(|link| link.id != id);
        self.persistence.save(&links)?;

        if links.len() < before {
            info!("Deleted link {}", id);
        }
        Ok(())
    }
}
