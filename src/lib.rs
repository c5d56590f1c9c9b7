// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Datastore
//!
//! A Rust-native Datastore query client with lazy cursor pagination.
//!
//! ## Features
//!
//! - **Lazy Iteration**: Pages are fetched only when results are demanded
//! - **Cursor Per Result**: Every entity comes with the cursor pointing after it
//! - **Request Limits**: Cap the number of page fetches per query run
//! - **Resilient Transport**: Retries, backoff and rate limiting below the pager
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::{StreamExt, TryStreamExt};
//! use solidafy_datastore::{ClientConfig, Dataset, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Environment overrides apply before validation
//!     let config = ClientConfig::load("datastore.yaml")?.with_env();
//!     config.validate()?;
//!     let dataset = Dataset::from_config(&config)?;
//!
//!     // Lazy: only as many pages as needed for 30 results
//!     let tasks: Vec<_> = dataset
//!         .run(dataset.query("Task"))
//!         .values()
//!         .take(30)
//!         .try_collect()
//!         .await?;
//!
//!     // Eager: at most one page
//!     dataset
//!         .run(dataset.query("Task"))
//!         .all(Some(1), |task| println!("{task:?}"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Dataset                                 │
//! │        query(kind) → Query        run(query) → ResultIterator   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │ ResultIterator: Init → HasBuffer ⇄ BufferEmptyMoreAvailable      │
//! │                 → Exhausted          values() / all()           │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┴──────────┬───────────────────────┐
//! │   Auth   │   PageFetcher                │   HttpClient          │
//! ├──────────┼──────────────────────────────┼───────────────────────┤
//! │ Bearer   │ one runQuery per page        │ Retry / Backoff       │
//! │ API Key  │ continue_from(end_cursor)    │ Rate Limit            │
//! └──────────┴──────────────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variants and filter operators before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Entity and key model
pub mod entity;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Query descriptors
pub mod query;

/// Query service transport
pub mod service;

/// Page fetching and lazy result iteration
pub mod pagination;

/// Client configuration
pub mod config;

/// High-level query client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::Dataset;
pub use config::ClientConfig;
pub use pagination::{IterState, Page, PageFetcher, ResultIterator};
pub use query::Query;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
