//! LinkHub Core Library
//!
//! This crate provides the core functionality for LinkHub, a small
//! link directory: a list of named hyperlinks with a category, notes and
//! creation time, stored as a single JSON document.
//!
//! # Architecture
//!
//! - **JSON document**: Source of truth, rewritten in full on every change
//! - **Store**: Reloads the document for every operation (no cache)
//! - **Query**: Pure filters over a snapshot returned by the store
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open_with_config(Config::load()?);
//!
//! // Add a link
//! let link = store.add(NewLink::new("Rust", "rust-lang.org"))?;
//!
//! // Query links
//! let query = LinkQuery::new().text("rust");
//! let links = query.apply(store.list()?);
//! ```
//!
//! # Modules
//!
//! - `store`: Link store (main entry point)
//! - `models`: The `Link` record, its input form, and seed data
//! - `query`: Search and category filters
//! - `storage`: JSON document persistence
//! - `error`: Error kinds surfaced to callers
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{LinkHubError, Result};
pub use models::{Link, NewLink};
pub use query::{distinct_categories, filter_by_category, filter_by_text, LinkQuery};
pub use storage::{JsonPersistence, StorageError};
pub use store::Store;
