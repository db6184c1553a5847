//! Merge pipeline
//!
//! input -> scan -> registry -> graph -> top -> reachable -> sort -> plan
//! -> render -> write. Everything up to the write happens in memory.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::emit::{banner, render, write_atomically, MergedDocument};
use super::plan::MergePlan;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::extract::{HdlScanner, PatternScanner};
use crate::graph::{reachable_from, topo_sort, DependencyGraph, ModuleRegistry, SortOutcome};
use crate::source::{locate_top, FileId, InputSource, SourceTree, TopMatch};

/// In-memory result of merging one tree
#[derive(Debug, Clone)]
pub struct TreeMerge {
    pub top: FileId,
    pub top_match: TopMatch,
    pub sort: SortOutcome,
    pub reachable_count: usize,
    pub duplicates: Vec<DuplicateReport>,
    pub document: MergedDocument,
}

/// A module declared by more than one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub module: String,
    pub kept: String,
    pub shadowed: String,
}

/// Run summary
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub top_file: String,
    pub top_module: String,
    /// How the top file was found
    pub top_match: TopMatch,
    pub package_count: usize,
    pub header_count: usize,
    pub module_count: usize,
    pub files_merged: usize,
    pub reachable_count: usize,
    pub cycle_fallback: bool,
    /// Files the sort could not place: cycle members and everything above them
    pub unordered_files: Vec<String>,
    pub duplicate_modules: Vec<DuplicateReport>,
}

/// Order and render an already scanned tree
pub fn merge_tree(tree: &SourceTree, config: &Config, scanner: &impl HdlScanner) -> Result<TreeMerge> {
    let registry = ModuleRegistry::build(tree);
    if config.order.strict_duplicates {
        registry.ensure_unambiguous(tree)?;
    }

    let graph = DependencyGraph::build(tree, &registry, scanner)?;

    let top_module = config.top_module();
    let (top, top_match) = locate_top(tree, &config.top.file, &top_module)?;

    let reachable = reachable_from(top, &graph);
    let sort = topo_sort(&reachable, &graph);

    let plan = MergePlan::new(tree, &config.order, sort.files().to_vec());
    let document = render(
        tree,
        &plan,
        banner(&top_module, &config.output.timescale),
    );

    let duplicates = registry
        .duplicates()
        .iter()
        .map(|dup| DuplicateReport {
            module: dup.module.clone(),
            kept: tree.file(dup.kept).rel.clone(),
            shadowed: tree.file(dup.shadowed).rel.clone(),
        })
        .collect();

    Ok(TreeMerge {
        top,
        top_match,
        sort,
        reachable_count: reachable.len(),
        duplicates,
        document,
    })
}

/// Resolve the input, merge it and write the output file
pub fn run(input: &InputSource, config: &Config) -> Result<MergeReport> {
    // Extracted archives stay on disk until `resolved` is dropped
    let resolved = input.resolve(&config.input)?;
    let scanner = PatternScanner::new();

    let tree = SourceTree::scan(resolved.root(), config, &scanner)?;
    let merge = merge_tree(&tree, config, &scanner)?;

    let output = config.output.path.clone();
    write_atomically(&output, &merge.document.text)?;

    let doc = &merge.document;
    info!(
        output = %output.display(),
        files = doc.files.len(),
        headers = doc.header_count,
        fallback = merge.sort.is_fallback(),
        "Merge complete"
    );

    Ok(MergeReport {
        root: resolved.root().to_path_buf(),
        output,
        top_file: tree.file(merge.top).rel.clone(),
        top_module: config.top_module(),
        top_match: merge.top_match,
        package_count: doc.package_count,
        header_count: doc.header_count,
        module_count: doc.module_count,
        files_merged: doc.files.len(),
        reachable_count: merge.reachable_count,
        cycle_fallback: merge.sort.is_fallback(),
        unordered_files: merge
            .sort
            .unordered()
            .iter()
            .map(|id| tree.file(*id).rel.clone())
            .collect(),
        duplicate_modules: merge.duplicates,
    })
}
