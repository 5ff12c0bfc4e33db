//! Command-line interface for sitecontent.

mod commands;

pub use commands::{is_verbose, run, Cli};
