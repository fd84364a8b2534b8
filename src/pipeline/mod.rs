//! Pipeline entry points.
//!
//! - `deduplicate` / `find_new`: identity-by-link diffing
//! - `run_watch`: scrape, diff, notify and persist one watch

pub mod diff;
pub mod watch;

pub use diff::{deduplicate, find_new};
pub use watch::{WatchSummary, run_watch};
