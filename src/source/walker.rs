use crate::core::config::SelectConfig;
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks an rtl tree and yields mergeable source files
pub struct SourceWalker<'a> {
    root: PathBuf,
    select: &'a SelectConfig,
}

impl<'a> SourceWalker<'a> {
    pub fn new(root: &Path, select: &'a SelectConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            select,
        }
    }

    /// Walk all selected files, sorted by path
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root).sort_by_file_name();

        for entry in walker {
            let entry = entry?;

            // Skip directories
            if !entry.file_type().is_file() {
                continue;
            }

            if is_source_file(entry.path(), self.select) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

/// Check if a file passes the selection policy
pub fn is_source_file(path: &Path, select: &SelectConfig) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !select
        .extensions
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    {
        return false;
    }

    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };

    if is_testbench(name, select) {
        return false;
    }

    // Ignore common non-RTL artifacts
    let lower = name.to_lowercase();
    !select
        .excluded_suffixes
        .iter()
        .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
}

/// Testbench naming convention (`*_tb.sv` and friends)
pub fn is_testbench(name: &str, select: &SelectConfig) -> bool {
    select
        .testbench_suffixes
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_selection_policy() {
        let select = SelectConfig::default();

        assert!(is_source_file(Path::new("rtl/core/Alu.sv"), &select));
        assert!(is_source_file(Path::new("rtl/incl/Types.svh"), &select));
        assert!(is_source_file(Path::new("rtl/core/ALU.SV"), &select));

        assert!(!is_source_file(Path::new("rtl/core/Alu_tb.sv"), &select));
        assert!(!is_source_file(Path::new("rtl/core/tb.sv"), &select));
        assert!(!is_source_file(Path::new("rtl/core/notes.txt"), &select));
        assert!(!is_source_file(Path::new("rtl/core/model.c"), &select));
        assert!(!is_source_file(Path::new("rtl/core/Alu.v"), &select));
    }

    #[test]
    fn test_walk_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("site")).unwrap();
        std::fs::create_dir_all(root.join("core")).unwrap();
        std::fs::write(root.join("site/SITE_0.sv"), "module SITE_0; endmodule\n").unwrap();
        std::fs::write(root.join("core/Alu.sv"), "module Alu; endmodule\n").unwrap();
        std::fs::write(root.join("core/Alu_tb.sv"), "module Alu_tb; endmodule\n").unwrap();
        std::fs::write(root.join("core/README.txt"), "docs\n").unwrap();

        let select = SelectConfig::default();
        let files = SourceWalker::new(root, &select).walk().unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            rel,
            vec![PathBuf::from("core/Alu.sv"), PathBuf::from("site/SITE_0.sv")]
        );
    }
}
