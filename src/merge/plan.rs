//! Tier planning
//!
//! Packages and headers are picked from the whole tree; modules come from
//! the topological sort of the reachable set.

use crate::core::config::OrderConfig;
use crate::source::{FileId, FileKind, SourceFile, SourceTree};

/// The three emission tiers, each already in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub packages: Vec<FileId>,
    pub headers: Vec<FileId>,
    pub modules: Vec<FileId>,
}

impl MergePlan {
    pub fn new(tree: &SourceTree, order: &OrderConfig, modules: Vec<FileId>) -> Self {
        Self {
            packages: order_packages(tree, order),
            headers: order_headers(tree, order),
            modules,
        }
    }
}

/// Root package first, the rest by path
pub fn order_packages(tree: &SourceTree, order: &OrderConfig) -> Vec<FileId> {
    let mut packages: Vec<&SourceFile> = tree
        .files()
        .iter()
        .filter(|f| f.kind == FileKind::Package)
        .collect();

    packages.sort_by_key(|f| {
        let rank = if f.file_name().eq_ignore_ascii_case(&order.root_package) {
            0
        } else {
            1
        };
        (rank, f.id)
    });

    packages.into_iter().map(|f| f.id).collect()
}

/// Root header first, shared typedef/interface headers next, the rest last
pub fn order_headers(tree: &SourceTree, order: &OrderConfig) -> Vec<FileId> {
    let mut headers: Vec<&SourceFile> = tree
        .files()
        .iter()
        .filter(|f| f.kind == FileKind::Header)
        .collect();

    headers.sort_by_key(|f| (header_rank(f, order), f.id));
    headers.into_iter().map(|f| f.id).collect()
}

fn header_rank(file: &SourceFile, order: &OrderConfig) -> u8 {
    if file.file_name().eq_ignore_ascii_case(&order.root_header) {
        return 0;
    }
    if is_shared_header(&file.rel, &order.shared_header_markers) {
        return 1;
    }
    2
}

/// Every marker appears somewhere in the path (case-insensitive)
fn is_shared_header(rel: &str, markers: &[String]) -> bool {
    if markers.is_empty() {
        return false;
    }
    let rel = rel.to_lowercase();
    markers
        .iter()
        .all(|marker| rel.contains(&marker.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::extract::PatternScanner;
    use std::path::Path;

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

    fn rels(tree: &SourceTree, ids: &[FileId]) -> Vec<String> {
        ids.iter().map(|id| tree.file(*id).rel.clone()).collect()
    }

    #[test]
    fn test_root_package_first() {
        let t = tree(&[
            ("pkg/AluPkg.sv", "package AluPkg;\nendpackage\n"),
            ("pkg/HelixPkg.sv", "package HelixPkg;\nendpackage\n"),
            ("pkg/BusPkg.sv", "package BusPkg;\nendpackage\n"),
            ("core/Alu.sv", "module Alu;\nendmodule\n"),
        ]);

        let order = order_packages(&t, &Config::default().order);
        assert_eq!(
            rels(&t, &order),
            vec!["pkg/HelixPkg.sv", "pkg/AluPkg.sv", "pkg/BusPkg.sv"]
        );
    }

    #[test]
    fn test_header_tiers() {
        let t = tree(&[
            ("core/Alu.svh", "`define ALU 1\n"),
            ("cordic/incl/CordicIf.svh", "interface CordicIf;\nendinterface\n"),
            ("cordic/Angles.svh", "`define PI 3\n"),
            ("incl/types.svh", "typedef int t;\n"),
            ("Cordic/Incl/CordicTypes.svh", "typedef int c;\n"),
        ]);

        let order = order_headers(&t, &Config::default().order);
        assert_eq!(
            rels(&t, &order),
            vec![
                "incl/types.svh",
                "Cordic/Incl/CordicTypes.svh",
                "cordic/incl/CordicIf.svh",
                "cordic/Angles.svh",
                "core/Alu.svh",
            ]
        );
    }

    #[test]
    fn test_plan_keeps_module_order() {
        let t = tree(&[
            ("Leaf.sv", "module Leaf;\nendmodule\n"),
            ("Top.sv", "module Top;\nendmodule\n"),
        ]);
        let modules = vec![t.by_rel("Top.sv").unwrap(), t.by_rel("Leaf.sv").unwrap()];

        let plan = MergePlan::new(&t, &Config::default().order, modules.clone());
        assert!(plan.packages.is_empty());
        assert!(plan.headers.is_empty());
        assert_eq!(plan.modules, modules);
    }
}
