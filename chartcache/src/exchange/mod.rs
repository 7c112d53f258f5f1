//! Exchange integration module
//!
//! The market-data provider contract and the Poloniex public API client.

pub mod client;
pub mod provider;

pub use client::*;
pub use provider::*;
