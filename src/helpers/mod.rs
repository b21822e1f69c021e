//! Helper functions for formatting dates and building site paths

mod date;
mod paths;

pub use date::*;
pub use paths::*;
