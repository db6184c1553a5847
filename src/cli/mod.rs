//! CLI definition and handler

mod args;
pub mod merge;

pub use args::Cli;
