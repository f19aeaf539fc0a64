//! CLI module
//!
//! Command-line interface for the Bot API toolkit.
//!
//! # Commands
//!
//! - `generate` - Scrape the documentation and write type declarations
//! - `call` - Call any Bot API method and print its result
//! - `me` - Show the bot's own user record

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
