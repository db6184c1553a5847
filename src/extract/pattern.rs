//! Pattern-Based HDL Scanner
//!
//! Best-effort SystemVerilog scanning with regular expressions. No lexer,
//! no AST: declarations are matched at line starts and instantiations by
//! the `Name #(...) inst (` / `Name inst (` shapes after comments are
//! removed. Tokens inside string literals or macro bodies can still match.
//!
//! @module extract/pattern

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Declarations, HdlScanner};
use crate::core::error::Result;

// =============================================================================
// COMPILED REGEX PATTERNS
// =============================================================================

/// `module Name` at the start of a line
static MODULE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*module\s+([a-zA-Z_][a-zA-Z0-9_]*)\b").unwrap());

/// `package Name` at the start of a line
static PACKAGE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*package\s+([a-zA-Z_][a-zA-Z0-9_]*)\b").unwrap());

/// `// ...` to end of line
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").unwrap());

/// `/* ... */`, possibly spanning lines
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

// =============================================================================
// MODULE UNIVERSE
// =============================================================================

/// Every known module name with its precompiled instantiation pattern
#[derive(Debug, Clone, Default)]
pub struct ModuleUniverse {
    patterns: BTreeMap<String, Regex>,
}

impl ModuleUniverse {
    /// Compile instantiation patterns for `names`
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            if patterns.contains_key(name) {
                continue;
            }
            patterns.insert(name.to_string(), instantiation_pattern(name)?);
        }
        Ok(Self { patterns })
    }

    /// Known module names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }
}

/// `Name #(` or `Name inst (`, with `Name` not preceded by a word character.
///
/// Module names always start with a word character, so a leading `\b`
/// rejects `FooName` while accepting `(Name`, ` Name` and line starts.
fn instantiation_pattern(name: &str) -> Result<Regex> {
    let pattern = format!(
        r"\b{}(?:\s*#\s*\(|\s+[A-Za-z_][A-Za-z0-9_]*\s*\()",
        regex::escape(name)
    );
    Ok(Regex::new(&pattern)?)
}

// =============================================================================
// SCANNER
// =============================================================================

/// Regex-driven [`HdlScanner`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScanner;

impl PatternScanner {
    pub fn new() -> Self {
        Self
    }
}

impl HdlScanner for PatternScanner {
    fn declarations(&self, text: &str) -> Declarations {
        Declarations {
            modules: capture_names(&MODULE_DECL, text),
            packages: capture_names(&PACKAGE_DECL, text),
        }
    }

    fn instantiations(&self, text: &str, universe: &ModuleUniverse) -> BTreeSet<String> {
        let cleaned = strip_comments(text);

        universe
            .patterns
            .iter()
            // Cheap prefilter before running the full pattern
            .filter(|(name, _)| cleaned.contains(name.as_str()))
            .filter(|(_, pattern)| pattern.is_match(&cleaned))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Remove `//` line comments, then `/* */` block comments
pub fn strip_comments(text: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(text, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}

fn capture_names(regex: &Regex, text: &str) -> BTreeSet<String> {
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
