//! HDL Extract Module
//!
//! Text-level view of a SystemVerilog source file: which modules and
//! packages it declares, and which known modules it instantiates.
//! The graph layer only talks to [`HdlScanner`], so the pattern-based
//! scanner can be swapped for a real parser without touching graph code.
//!
//! @module extract

pub mod pattern;

use std::collections::BTreeSet;

pub use pattern::{strip_comments, ModuleUniverse, PatternScanner};

// =============================================================================
// DECLARATIONS
// =============================================================================

/// Names declared by a single source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub modules: BTreeSet<String>,
    pub packages: BTreeSet<String>,
}

impl Declarations {
    /// Check if the file declares nothing
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.packages.is_empty()
    }

    /// Check if the file declares `module <name>`
    pub fn declares_module(&self, name: &str) -> bool {
        self.modules.contains(name)
    }

    /// A package-only file declares packages and no modules
    pub fn is_package_only(&self) -> bool {
        !self.packages.is_empty() && self.modules.is_empty()
    }
}

// =============================================================================
// SCANNER INTERFACE
// =============================================================================

/// Extracts declarations and instantiations from HDL text
pub trait HdlScanner {
    /// Module and package names declared by `text`
    fn declarations(&self, text: &str) -> Declarations;

    /// Names from `universe` that `text` appears to instantiate
    fn instantiations(&self, text: &str, universe: &ModuleUniverse) -> BTreeSet<String>;
}
