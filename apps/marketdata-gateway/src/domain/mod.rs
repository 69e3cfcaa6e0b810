//! Domain Layer
//!
//! Canonical market data records, independent of the upstream exchange's
//! wire representation. Each record is a value object created fresh per
//! acquisition call and owned by the caller; there is no shared mutable
//! state. Once a value exists here it is an ordinary numeric type - the
//! string-or-number ambiguity of the upstream API never leaks past the
//! infrastructure decoders.

pub mod market;
