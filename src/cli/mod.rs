//! Command-line interface for lepimap.

mod commands;
mod helpers;

pub use commands::{is_verbose, run};
