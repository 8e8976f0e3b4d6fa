//! # vcdb
//!
//! Builds a relational view of a version control repository's history: one
//! row per change and one row per path touched by a change, so the history
//! can be queried with SQL.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use vcdb::ingest::{IngestOptions, update_repository};
//! use vcdb::store::{SqliteStore, Store};
//! use vcdb::svn::SvnClient;
//!
//! let store = SqliteStore::new("vcdb.db").unwrap();
//! store.initialize().unwrap();
//!
//! let summary = update_repository(
//!     &store,
//!     &SvnClient::default(),
//!     "https://svn.example.com/project/trunk",
//!     &IngestOptions::default(),
//! )
//! .unwrap();
//! println!("{} changes", summary.changes);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod store;
pub mod svn;
pub mod types;
