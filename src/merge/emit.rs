//! Merge Emitter
//!
//! Renders the merged document in memory: banner, then the package,
//! header and module tiers. The set of already emitted files travels
//! through the tiers inside an [`Emission`] value, so a file that
//! qualifies for two tiers is written once, in the first.
//!
//! @module merge/emit

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;

use super::plan::MergePlan;
use crate::core::error::Result;
use crate::source::{FileId, SourceTree};

/// A whole line holding `` `include "path" `` with an optional `;`
static INCLUDE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*`include[ \t]+"[^"\n]+"[ \t]*;?[ \t]*\r?(?:\n|\z)"#).unwrap()
});

// =============================================================================
// BANNER
// =============================================================================

/// Deterministic document header; no timestamps
pub fn banner(top_module: &str, timescale: &str) -> String {
    format!(
        "// =============================================================\n\
         // RTL Single-File Merge for {top}\n\
         // Generated by svmerge\n\
         // Order: pkg -> headers (.svh) -> reachable modules (topologically sorted) -> {top}\n\
         // Notes:\n\
         //  * All `include directives have been removed (files are inlined by order).\n\
         //  * Testbench files were excluded.\n\
         //  * This file is auto-generated; do not edit by hand.\n\
         // =============================================================\n\
         `timescale {timescale}\n\
         \n",
        top = top_module,
        timescale = timescale,
    )
}

/// Remove every full-line include directive
pub fn strip_includes(text: &str) -> String {
    INCLUDE_DIRECTIVE.replace_all(text, "").into_owned()
}

// =============================================================================
// EMISSION
// =============================================================================

/// Accumulates the document while tiers are appended
#[derive(Debug, Clone)]
pub struct Emission {
    body: String,
    emitted: BTreeSet<FileId>,
    order: Vec<FileId>,
}

impl Emission {
    pub fn start(banner: String) -> Self {
        Self {
            body: banner,
            emitted: BTreeSet::new(),
            order: Vec::new(),
        }
    }

    /// Append every not-yet-emitted file of `tier`, in order
    pub fn tier(mut self, tree: &SourceTree, tier: &[FileId]) -> (Self, usize) {
        let mut added = 0;
        for id in tier {
            if !self.emitted.insert(*id) {
                continue;
            }
            self.append(tree, *id);
            self.order.push(*id);
            added += 1;
        }
        (self, added)
    }

    fn append(&mut self, tree: &SourceTree, id: FileId) {
        let file = tree.file(id);
        self.body
            .push_str(&format!("// ===== Begin {} =====\n", file.rel));
        self.body.push_str(strip_includes(&file.text).trim_end());
        self.body.push_str("\n\n");
        self.body
            .push_str(&format!("// ===== End {} =====\n\n", file.rel));
    }

    pub fn finish(self) -> (String, Vec<FileId>) {
        (self.body, self.order)
    }
}

/// Rendered merge, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDocument {
    pub text: String,
    /// Files in emission order
    pub files: Vec<FileId>,
    pub package_count: usize,
    pub header_count: usize,
    pub module_count: usize,
}

/// Render the banner and the three tiers
pub fn render(tree: &SourceTree, plan: &MergePlan, banner: String) -> MergedDocument {
    let emission = Emission::start(banner);
    let (emission, package_count) = emission.tier(tree, &plan.packages);
    let (emission, header_count) = emission.tier(tree, &plan.headers);
    let (emission, module_count) = emission.tier(tree, &plan.modules);
    let (text, files) = emission.finish();

    MergedDocument {
        text,
        files,
        package_count,
        header_count,
        module_count,
    }
}

/// Write `text` to `path` via a sibling temp file, so a failed write
/// never leaves a partial output behind
pub fn write_atomically(path: &Path, text: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
