//! Data management module
//!
//! Candle observations as delivered by the exchange, the persisted per-pair
//! chart record, and the derived time-indexed table.

pub mod candle;
pub mod record;
pub mod table;

pub use candle::*;
pub use record::*;
pub use table::*;
