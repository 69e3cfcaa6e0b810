//! Infrastructure Layer
//!
//! Adapters for external systems. Currently a single exchange adapter:
//! LBank, reached through relay routes.

pub mod lbank;
