//! Read-through chart cache
//!
//! Serves the stored chart for a pair while it is fresh and refetches it
//! from the exchange once it is older than [`STALE_AFTER_SECS`].

pub mod chart_cache;
pub mod clock;

pub use chart_cache::*;
pub use clock::*;
