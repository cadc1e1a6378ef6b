//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod example;
mod generate;
mod inspect;
mod utils;

pub use completions::handle_completions;
pub use example::handle_example;
pub use generate::handle_generate;
pub use inspect::handle_inspect;
