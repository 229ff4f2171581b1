//! High-level API surface
//!
//! The engine talks to market data through [`MarketSource`] so the fetch
//! pipeline can run against an in-memory source in tests.

mod source;

pub use source::*;
