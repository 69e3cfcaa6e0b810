//! Application Layer
//!
//! Port definitions for the caller-facing acquisition surface.

pub mod ports;

pub use ports::MarketDataPort;
