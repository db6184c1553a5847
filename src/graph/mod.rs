//! Dependency graph over source files
//!
//! - Module registry (module name -> defining file)
//! - "uses" / "used by" adjacency between files
//! - Reachability from the top file
//! - Deterministic topological ordering with a path-order fallback
//!
//! @module graph

pub mod builder;
pub mod registry;
pub mod sort;
pub mod traverse;

pub use builder::DependencyGraph;
pub use registry::{DuplicateModule, ModuleRegistry};
pub use sort::{topo_sort, FallbackReason, SortOutcome};
pub use traverse::reachable_from;
