//! Source tree model
//!
//! Every selected file is read exactly once and kept in memory for graph
//! building and emission. Files are stored sorted by their canonical path
//! (root-relative, `/`-separated), so ordering `FileId`s is the same as
//! ordering canonical paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::walker::SourceWalker;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::extract::{Declarations, HdlScanner};

// =============================================================================
// IDS AND KINDS
// =============================================================================

/// Index of a file in its [`SourceTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FileId(pub usize);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Merge category of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Package,
    Header,
    Module,
}

impl FileKind {
    /// Packages and modules take part in the dependency graph; headers do not
    pub fn is_graph_node(&self) -> bool {
        !matches!(self, Self::Header)
    }
}

// =============================================================================
// SOURCE FILE
// =============================================================================

/// A selected source file, immutable after scanning
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Canonical path: relative to the root, `/`-separated
    pub rel: String,
    pub kind: FileKind,
    pub text: String,
    pub declarations: Declarations,
}

impl SourceFile {
    /// Final path component of the canonical path
    pub fn file_name(&self) -> &str {
        self.rel.rsplit('/').next().unwrap_or(&self.rel)
    }
}

// =============================================================================
// SOURCE TREE
// =============================================================================

/// All selected files under one rtl root
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl SourceTree {
    /// Walk `root`, read every selected file and extract its declarations
    pub fn scan(root: &Path, config: &Config, scanner: &impl HdlScanner) -> Result<Self> {
        let paths = SourceWalker::new(root, &config.select).walk()?;

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = std::fs::read(&path)?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            sources.push((canonical_rel(root, &path), text));
        }

        let tree = Self::from_sources(root, sources, config, scanner);
        if tree.is_empty() {
            return Err(Error::NoSourceFiles {
                root: root.to_path_buf(),
            });
        }

        debug!(
            root = %root.display(),
            files = tree.len(),
            headers = tree.ids_of_kind(FileKind::Header).count(),
            packages = tree.ids_of_kind(FileKind::Package).count(),
            "Scanned source tree"
        );

        Ok(tree)
    }

    /// Build a tree from already-loaded `(canonical path, text)` pairs
    pub fn from_sources<I>(root: &Path, sources: I, config: &Config, scanner: &impl HdlScanner) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut sources: Vec<(String, String)> = sources.into_iter().collect();
        sources.sort_by(|a, b| a.0.cmp(&b.0));
        sources.dedup_by(|a, b| a.0 == b.0);

        let files = sources
            .into_iter()
            .enumerate()
            .map(|(idx, (rel, text))| {
                let declarations = scanner.declarations(&text);
                let kind = classify(&rel, &declarations, config);
                SourceFile {
                    id: FileId(idx),
                    path: root.join(&rel),
                    rel,
                    kind,
                    text,
                    declarations,
                }
            })
            .collect();

        Self {
            root: root.to_path_buf(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file by canonical path
    pub fn by_rel(&self, rel: &str) -> Option<FileId> {
        self.files
            .binary_search_by(|f| f.rel.as_str().cmp(rel))
            .ok()
            .map(FileId)
    }

    /// Files of one kind, in canonical path order
    pub fn ids_of_kind(&self, kind: FileKind) -> impl Iterator<Item = FileId> + '_ {
        self.files
            .iter()
            .filter(move |f| f.kind == kind)
            .map(|f| f.id)
    }

    /// Files that take part in the dependency graph, in canonical path order
    pub fn graph_files(&self) -> impl Iterator<Item = &SourceFile> + '_ {
        self.files.iter().filter(|f| f.kind.is_graph_node())
    }
}

/// Categorize a file by extension, location and declarations
pub fn classify(rel: &str, declarations: &Declarations, config: &Config) -> FileKind {
    let ext = rel.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    if ext.eq_ignore_ascii_case(&config.select.header_extension) {
        return FileKind::Header;
    }

    let package_dir = &config.order.package_dir;
    let mut dirs = rel.split('/').rev().skip(1);
    if dirs.any(|segment| segment.eq_ignore_ascii_case(package_dir)) {
        return FileKind::Package;
    }

    if declarations.is_package_only() {
        return FileKind::Package;
    }

    FileKind::Module
}

/// Root-relative, `/`-separated form of `path`
pub fn canonical_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PatternScanner;
    use tempfile::tempdir;

    fn tree(sources: &[(&str, &str)]) -> SourceTree {
        SourceTree::from_sources(
            Path::new("/rtl"),
            sources
                .iter()
                .map(|(rel, text)| (rel.to_string(), text.to_string())),
            &Config::default(),
            &PatternScanner::new(),
        )
    }

    #[test]
    fn test_sorted_ids_follow_paths() {
        let t = tree(&[
            ("site/SITE_0.sv", "module SITE_0;\nendmodule\n"),
            ("core/Alu.sv", "module Alu;\nendmodule\n"),
            ("core/Types.svh", "typedef logic [7:0] byte_t;\n"),
        ]);

        let rels: Vec<_> = t.files().iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(rels, vec!["core/Alu.sv", "core/Types.svh", "site/SITE_0.sv"]);
        assert_eq!(t.by_rel("site/SITE_0.sv"), Some(FileId(2)));
        assert_eq!(t.by_rel("missing.sv"), None);
        assert_eq!(t.file(FileId(1)).file_name(), "Types.svh");
    }

    #[test]
    fn test_classification() {
        let t = tree(&[
            ("pkg/HelixPkg.sv", "package HelixPkg;\nendpackage\n"),
            ("PKG/Extra.sv", "module NotReallyPkg;\nendmodule\n"),
            ("RootPkg.sv", "package RootPkg;\nendpackage\n"),
            ("Mixed.sv", "package P;\nendpackage\nmodule M;\nendmodule\n"),
            ("incl/Types.svh", "typedef int t;\n"),
            ("pkg.sv", "module pkg_user;\nendmodule\n"),
        ]);

        let kind = |rel: &str| t.file(t.by_rel(rel).unwrap()).kind;
        assert_eq!(kind("pkg/HelixPkg.sv"), FileKind::Package);
        assert_eq!(kind("PKG/Extra.sv"), FileKind::Package);
        assert_eq!(kind("RootPkg.sv"), FileKind::Package);
        assert_eq!(kind("Mixed.sv"), FileKind::Module);
        assert_eq!(kind("incl/Types.svh"), FileKind::Header);
        assert_eq!(kind("pkg.sv"), FileKind::Module);
        assert_eq!(t.graph_files().count(), 5);
    }

    #[test]
    fn test_scan_reads_disk() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("core")).unwrap();
        std::fs::write(root.join("core/Leaf.sv"), "module Leaf;\nendmodule\n").unwrap();
        std::fs::write(root.join("core/Leaf_tb.sv"), "module Leaf_tb;\nendmodule\n").unwrap();

        let t = SourceTree::scan(root, &Config::default(), &PatternScanner::new()).unwrap();
        assert_eq!(t.len(), 1);
        let leaf = t.file(FileId(0));
        assert_eq!(leaf.rel, "core/Leaf.sv");
        assert!(leaf.declarations.declares_module("Leaf"));
    }

    #[test]
    fn test_scan_empty_tree() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "nothing here\n").unwrap();

        let err = SourceTree::scan(dir.path(), &Config::default(), &PatternScanner::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoSourceFiles { .. }));
    }

    #[test]
    fn test_canonical_rel() {
        let root = Path::new("/work/rtl");
        assert_eq!(
            canonical_rel(root, &root.join("core").join("Alu.sv")),
            "core/Alu.sv"
        );
    }
}
