//! Module registry: module name -> defining file

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::core::error::{Error, Result};
use crate::source::{FileId, SourceTree};

/// Two files declaring the same module name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateModule {
    pub module: String,
    /// File that owns the name once every file is registered
    pub kept: FileId,
    /// Earlier declaration that lost
    pub shadowed: FileId,
}

/// Maps every declared module to the single file that defines it
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    by_name: BTreeMap<String, FileId>,
    duplicates: Vec<DuplicateModule>,
}

impl ModuleRegistry {
    /// Register the modules of every graph file.
    ///
    /// Files are visited in canonical path order and the last declaration
    /// of a name wins; each conflict is recorded.
    pub fn build(tree: &SourceTree) -> Self {
        let mut registry = Self::default();

        for file in tree.graph_files() {
            for module in &file.declarations.modules {
                registry.register(module, file.id);
            }
        }

        // A later declaration may have replaced the file a conflict first named
        for dup in &mut registry.duplicates {
            if let Some(winner) = registry.by_name.get(&dup.module) {
                dup.kept = *winner;
            }
        }

        for dup in &registry.duplicates {
            warn!(
                module = %dup.module,
                kept = %tree.file(dup.kept).rel,
                shadowed = %tree.file(dup.shadowed).rel,
                "Module declared in more than one file"
            );
        }

        registry
    }

    fn register(&mut self, module: &str, file: FileId) {
        if let Some(previous) = self.by_name.insert(module.to_string(), file) {
            if previous != file {
                self.duplicates.push(DuplicateModule {
                    module: module.to_string(),
                    kept: file,
                    shadowed: previous,
                });
            }
        }
    }

    /// Defining file of `module`
    pub fn resolve(&self, module: &str) -> Option<FileId> {
        self.by_name.get(module).copied()
    }

    /// All registered module names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateModule] {
        &self.duplicates
    }

    /// Fail on the first duplicate declaration
    pub fn ensure_unambiguous(&self, tree: &SourceTree) -> Result<()> {
        match self.duplicates.first() {
            Some(dup) => Err(Error::DuplicateModule {
                module: dup.module.clone(),
                first: tree.file(dup.shadowed).rel.clone(),
                second: tree.file(dup.kept).rel.clone(),
            }),
            None => Ok(()),
        }
    }
}
