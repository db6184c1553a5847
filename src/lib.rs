//! svmerge - flatten a SystemVerilog RTL tree into one ordered file
//!
//! Scans the tree for module and package declarations, builds a
//! file-level instantiation graph, keeps what the top module needs and
//! emits packages, headers and topologically sorted modules in one file.

pub mod cli;
pub mod core;
pub mod extract;
pub mod graph;
pub mod merge;
pub mod output;
pub mod source;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use merge::{merge_tree, MergeReport};
pub use source::{InputSource, SourceTree};
