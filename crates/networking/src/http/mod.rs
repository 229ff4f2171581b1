//! HTTP transport and response decoding

mod client;
mod decode;

pub use client::*;
pub use decode::*;
