//! Configuration module

pub mod chart;

pub use chart::*;
