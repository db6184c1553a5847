//! Dependency Graph Builder
//!
//! Runs the instantiation detector over every graph file and resolves each
//! instantiated module to its defining file.
//!
//! @module graph/builder

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use super::registry::ModuleRegistry;
use crate::core::error::Result;
use crate::extract::{HdlScanner, ModuleUniverse};
use crate::source::{FileId, SourceTree};

static NO_FILES: BTreeSet<FileId> = BTreeSet::new();

// =============================================================================
// DEPENDENCY GRAPH
// =============================================================================

/// File-level dependency graph.
///
/// `uses` and `used_by` are exact transposes of each other and never
/// contain self-loops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// file -> files whose modules it instantiates
    uses: BTreeMap<FileId, BTreeSet<FileId>>,
    /// file -> files that instantiate its modules
    used_by: BTreeMap<FileId, BTreeSet<FileId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for every graph file of `tree`
    pub fn build(
        tree: &SourceTree,
        registry: &ModuleRegistry,
        scanner: &impl HdlScanner,
    ) -> Result<Self> {
        let universe = ModuleUniverse::new(registry.names())?;
        let mut graph = Self::new();

        for file in tree.graph_files() {
            for module in scanner.instantiations(&file.text, &universe) {
                match registry.resolve(&module) {
                    Some(defining) => graph.add_edge(file.id, defining),
                    None => {
                        trace!(file = %file.rel, module = %module, "Unresolved instantiation");
                    }
                }
            }
        }

        debug!(
            files = tree.len(),
            modules = universe.len(),
            edges = graph.edge_count(),
            "Built dependency graph"
        );

        Ok(graph)
    }

    /// Record that `user` instantiates a module defined in `dependency`.
    ///
    /// Self-references are dropped.
    pub fn add_edge(&mut self, user: FileId, dependency: FileId) {
        if user == dependency {
            return;
        }
        self.uses.entry(user).or_default().insert(dependency);
        self.used_by.entry(dependency).or_default().insert(user);
    }

    /// Files whose modules `file` instantiates
    pub fn dependencies(&self, file: FileId) -> &BTreeSet<FileId> {
        self.uses.get(&file).unwrap_or(&NO_FILES)
    }

    /// Files that instantiate modules of `file`
    pub fn dependents(&self, file: FileId) -> &BTreeSet<FileId> {
        self.used_by.get(&file).unwrap_or(&NO_FILES)
    }

    pub fn edge_count(&self) -> usize {
        self.uses.values().map(BTreeSet::len).sum()
    }

    /// Every edge as `(user, dependency)`, sorted
    pub fn edges(&self) -> impl Iterator<Item = (FileId, FileId)> + '_ {
        self.uses
            .iter()
            .flat_map(|(user, deps)| deps.iter().map(move |dep| (*user, *dep)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
