//! Pipeline entry points.
//!
//! - `load_dashboard`: Fetch, parse and normalize one sheet snapshot
//! - `Refresher`: Re-run the pipeline on an interval, one run at a time

pub mod load;
pub mod refresh;

pub use load::{LoadOptions, load_dashboard};
pub use refresh::{RefreshOutcome, Refresher};
