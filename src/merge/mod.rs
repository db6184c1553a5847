//! Merge planning, rendering and the end-to-end pipeline

pub mod emit;
pub mod pipeline;
pub mod plan;

pub use emit::{banner, render, strip_includes, write_atomically, Emission, MergedDocument};
pub use pipeline::{merge_tree, run, DuplicateReport, MergeReport, TreeMerge};
pub use plan::MergePlan;
