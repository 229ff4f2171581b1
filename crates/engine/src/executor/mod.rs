//! Background fetch execution

mod dispatcher;

pub use dispatcher::*;
