//! Source discovery: input resolution, file selection and scanning

pub mod input;
pub mod locate;
pub mod tree;
pub mod walker;

pub use input::{InputSource, ResolvedInput};
pub use locate::{locate_top, TopMatch};
pub use tree::{FileId, FileKind, SourceFile, SourceTree};
pub use walker::SourceWalker;
