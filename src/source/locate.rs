use serde::Serialize;
use tracing::debug;

use super::tree::{FileId, FileKind, SourceTree};
use crate::core::error::{Error, Result};

/// How the top file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopMatch {
    /// The configured relative path exists
    Path,
    /// A file with the same name lives elsewhere in the tree
    FileName,
    /// A file declares the top module
    Declaration,
}

impl TopMatch {
    /// Short description for summaries
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Path => "configured path",
            Self::FileName => "file name search",
            Self::Declaration => "module declaration",
        }
    }
}

/// Locate the top-level file.
///
/// Tries the configured relative path, then a file with the same name
/// (case-insensitive), then a file declaring `module <top_module>`.
pub fn locate_top(tree: &SourceTree, top_file: &str, top_module: &str) -> Result<(FileId, TopMatch)> {
    let wanted = normalize_rel(top_file);

    if let Some(id) = tree.by_rel(&wanted) {
        if tree.file(id).kind != FileKind::Header {
            return Ok((id, TopMatch::Path));
        }
    }

    let name = wanted.rsplit('/').next().unwrap_or(&wanted);
    if let Some(file) = tree
        .graph_files()
        .find(|f| f.file_name().eq_ignore_ascii_case(name))
    {
        debug!(top = %file.rel, "Top file found by name");
        return Ok((file.id, TopMatch::FileName));
    }

    if let Some(file) = tree
        .graph_files()
        .find(|f| f.declarations.declares_module(top_module))
    {
        debug!(top = %file.rel, module = top_module, "Top file found by declaration");
        return Ok((file.id, TopMatch::Declaration));
    }

    Err(Error::TopNotFound {
        top_file: top_file.to_string(),
        top_module: top_module.to_string(),
    })
}

fn normalize_rel(rel: &str) -> String {
    let rel = rel.replace('\\', "/");
    rel.trim_start_matches("./").trim_start_matches('/').to_string()
}
