//! Coinchart Core - Shared data models, types, and errors

pub mod errors;
pub mod models;
pub mod types;

pub use errors::{Error, Result, OVERLOADED_MESSAGE, RANGE_LIMIT_MESSAGE};
pub use models::*;
pub use types::*;
