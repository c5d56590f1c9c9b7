//! Pagination module
//!
//! Turns a chain of cursor-linked query batches into one lazy result stream.
//!
//! # Overview
//!
//! - `PageFetcher` - issues exactly one `runQuery` call per page, deriving
//!   the continuation query from the previous page's end cursor
//! - `ResultIterator` - buffers one page at a time and walks the
//!   `Init → HasBuffer → BufferEmptyMoreAvailable → Exhausted` state machine,
//!   fetching only when the buffer runs dry and the request limit allows it
//!
//! Both result views (`values`, `values_with_cursor`) and the eager `all`
//! helpers drive the same state machine.

mod fetcher;
mod iterator;

pub use fetcher::{Page, PageFetcher};
pub use iterator::{CursorStream, IterState, ResultIterator, Values};
