//! Topological Sorter
//!
//! Kahn's algorithm over the reachable subgraph. Ties are broken by
//! canonical path (`FileId` order), so a fixed tree always produces the
//! same order. A cycle never fails the merge: the whole set falls back to
//! canonical path order and the outcome says so.
//!
//! @module graph/sort

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::warn;

use super::builder::DependencyGraph;
use crate::source::FileId;

// =============================================================================
// SORT OUTCOME
// =============================================================================

/// Why the sorter gave up on dependency order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Files left with unmet dependencies after elimination
    CycleDetected { unordered: Vec<FileId> },
}

/// Result of ordering the reachable set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// Every dependency precedes its dependents
    Ordered(Vec<FileId>),
    /// Canonical path order over the whole set
    FallbackOrdered {
        files: Vec<FileId>,
        reason: FallbackReason,
    },
}

impl SortOutcome {
    pub fn files(&self) -> &[FileId] {
        match self {
            Self::Ordered(files) => files,
            Self::FallbackOrdered { files, .. } => files,
        }
    }

    pub fn into_files(self) -> Vec<FileId> {
        match self {
            Self::Ordered(files) => files,
            Self::FallbackOrdered { files, .. } => files,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackOrdered { .. })
    }

    /// Files caught in a cycle (empty when ordered)
    pub fn unordered(&self) -> &[FileId] {
        match self {
            Self::Ordered(_) => &[],
            Self::FallbackOrdered {
                reason: FallbackReason::CycleDetected { unordered },
                ..
            } => unordered.as_slice(),
        }
    }
}

// =============================================================================
// SORT
// =============================================================================

/// Order `reachable` so each file follows every file it depends on
pub fn topo_sort(reachable: &BTreeSet<FileId>, graph: &DependencyGraph) -> SortOutcome {
    let mut in_degree: BTreeMap<FileId, usize> = reachable
        .iter()
        .map(|file| {
            let deps = graph
                .dependencies(*file)
                .iter()
                .filter(|dep| reachable.contains(*dep))
                .count();
            (*file, deps)
        })
        .collect();

    let mut queue: VecDeque<FileId> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(file, _)| *file)
        .collect();

    let mut order = Vec::with_capacity(reachable.len());

    while let Some(file) = queue.pop_front() {
        order.push(file);

        for dependent in graph.dependents(file) {
            let Some(degree) = in_degree.get_mut(dependent) else {
                continue;
            };
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(*dependent);
            }
        }
    }

    if order.len() == reachable.len() {
        return SortOutcome::Ordered(order);
    }

    let placed: BTreeSet<FileId> = order.into_iter().collect();
    let unordered = reachable.difference(&placed).copied().collect();

    warn!(
        reachable = reachable.len(),
        ordered = placed.len(),
        "Dependency cycle detected, falling back to path order"
    );

    SortOutcome::FallbackOrdered {
        files: reachable.iter().copied().collect(),
        reason: FallbackReason::CycleDetected { unordered },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(usize, usize)]) -> DependencyGraph {
        let mut g = DependencyGraph::new();
        for (user, dep) in edges {
            g.add_edge(FileId(*user), FileId(*dep));
        }
        g
    }

    fn ids(raw: &[usize]) -> BTreeSet<FileId> {
        raw.iter().copied().map(FileId).collect()
    }

    fn position(order: &[FileId], file: FileId) -> usize {
        order.iter().position(|f| *f == file).unwrap()
    }

    #[test]
    fn test_dependencies_come_first() {
        // 3 uses 1 and 2, 1 uses 0, 2 uses 0
        let g = graph(&[(3, 1), (3, 2), (1, 0), (2, 0)]);
        let reachable = ids(&[0, 1, 2, 3]);

        let outcome = topo_sort(&reachable, &g);
        assert!(!outcome.is_fallback());

        let order = outcome.files();
        for (user, dep) in g.edges() {
            assert!(position(order, dep) < position(order, user));
        }
        assert_eq!(order, &[FileId(0), FileId(1), FileId(2), FileId(3)]);
    }

    #[test]
    fn test_ties_break_by_path_order() {
        // 0 uses 3; 1 and 2 are free. Free nodes come out in id order first.
        let g = graph(&[(0, 3)]);
        let outcome = topo_sort(&ids(&[0, 1, 2, 3]), &g);
        assert_eq!(outcome.into_files(), vec![FileId(1), FileId(2), FileId(3), FileId(0)]);
    }

    #[test]
    fn test_edges_outside_reachable_are_ignored() {
        // 1 depends on 5, which is not part of the set
        let g = graph(&[(1, 5), (1, 0)]);
        let outcome = topo_sort(&ids(&[0, 1]), &g);
        assert_eq!(outcome, SortOutcome::Ordered(vec![FileId(0), FileId(1)]));
    }

    #[test]
    fn test_cycle_falls_back_to_path_order() {
        // 2 uses 1, 1 uses 0, 0 uses 1
        let g = graph(&[(2, 1), (1, 0), (0, 1)]);
        let reachable = ids(&[0, 1, 2]);

        let outcome = topo_sort(&reachable, &g);
        assert!(outcome.is_fallback());
        assert_eq!(outcome.files(), &[FileId(0), FileId(1), FileId(2)]);
        assert_eq!(outcome.unordered(), &[FileId(0), FileId(1), FileId(2)]);

        let as_set: BTreeSet<_> = outcome.files().iter().copied().collect();
        assert_eq!(as_set, reachable);
    }

    #[test]
    fn test_partial_cycle_reports_only_stuck_files() {
        // 3 is a free leaf used by 0; 0 and 1 form a cycle
        let g = graph(&[(0, 1), (1, 0), (0, 3)]);
        let outcome = topo_sort(&ids(&[0, 1, 3]), &g);
        assert_eq!(
            outcome,
            SortOutcome::FallbackOrdered {
                files: vec![FileId(0), FileId(1), FileId(3)],
                reason: FallbackReason::CycleDetected {
                    unordered: vec![FileId(0), FileId(1)],
                },
            }
        );
    }

    #[test]
    fn test_repeatable() {
        let g = graph(&[(4, 2), (4, 3), (3, 0), (2, 1)]);
        let reachable = ids(&[0, 1, 2, 3, 4]);
        assert_eq!(topo_sort(&reachable, &g), topo_sort(&reachable, &g));
    }
}
