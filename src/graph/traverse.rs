//! Reachability Walker
//!
//! BFS from the top file over dependency edges. The visited set keeps
//! cycles from looping and each file from being expanded twice.
//!
//! @module graph/traverse

use std::collections::{BTreeSet, VecDeque};

use super::builder::DependencyGraph;
use crate::source::FileId;

/// Every file the top file needs, transitively, including itself
pub fn reachable_from(top: FileId, graph: &DependencyGraph) -> BTreeSet<FileId> {
    let mut needed = BTreeSet::new();
    let mut queue = VecDeque::from([top]);

    while let Some(current) = queue.pop_front() {
        if !needed.insert(current) {
            continue;
        }
        for dep in graph.dependencies(current) {
            if !needed.contains(dep) {
                queue.push_back(*dep);
            }
        }
    }

    needed
}
