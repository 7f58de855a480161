//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `search` - Search repositories
//! - `commits` - List commits of a repository
//! - `content` - Print one file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
