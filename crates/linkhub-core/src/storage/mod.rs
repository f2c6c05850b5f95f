//! Storage layer
//!
//! Handles persistence of the link collection as one JSON document.
//!
//! ## Architecture
//!
//! - **JSON file**: Source of truth, rewritten atomically on every save
//! - No incremental updates, no transactions
//!
//! A missing file is seeded with sample links. An unreadable file degrades
//! to an empty collection (with a warning and a backup copy).

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
