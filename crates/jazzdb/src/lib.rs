//! # jazzdb Architecture
//!
//! jazzdb is the library behind the `swing` CLI: an immutable, in-memory catalog of jazz
//! standards with their chord progressions, plus search, statistics and harmonic
//! similarity over it. The CLI is one client; nothing in here knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (swing crate)                                          │
//! │  - Parses arguments, renders output, picks exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns the Catalog, dispatches to commands                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One module per verb, returns CmdResult                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines: search.rs, stats.rs, progression/similarity.rs    │
//! │  Data:    catalog.rs, index.rs, model.rs, progression/      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! The catalog is loaded exactly once, before any command runs ([`catalog::Catalog::load`]).
//! Every chord is parsed and every index is built during that load, so a loaded catalog
//! cannot fail a query on data shape. After load the catalog is `Sync` and shared by
//! reference; command results borrow songs from it.
//!
//! ## Errors
//!
//! Load errors are fatal and name the first bad record. Query errors (bad syntax, unknown
//! filter field) are reported per invocation. A search that finds nothing is an empty
//! result. See [`error`].

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod progression;
pub mod query;
pub mod search;
pub mod stats;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use api::SwingApi;
pub use catalog::Catalog;
pub use error::{JazzError, LoadError, QueryError, Result};
pub use model::{Song, SongId};
pub use query::{Filter, Query};
