//! Configuration management

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "svmerge.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SVMERGE_CONFIG";

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub top: TopConfig,
    pub output: OutputConfig,
    pub select: SelectConfig,
    pub order: OrderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory name marking the source root inside an archive
    pub root_dir_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopConfig {
    /// Top file, relative to the source root
    pub file: String,
    /// Top module name (defaults to the top file stem)
    pub module: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Merged output file
    pub path: PathBuf,
    /// Timescale directive written after the banner
    pub timescale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Accepted source extensions (case-insensitive)
    pub extensions: Vec<String>,
    /// Extension identifying header files
    pub header_extension: String,
    /// File name suffixes marking testbenches
    pub testbench_suffixes: Vec<String>,
    /// File name suffixes that are never sources
    pub excluded_suffixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Package file emitted before every other package
    pub root_package: String,
    /// Path segment whose files are packages
    pub package_dir: String,
    /// Header emitted before every other header
    pub root_header: String,
    /// Path fragments that together mark shared typedef/interface headers
    pub shared_header_markers: Vec<String>,
    /// Reject trees where two files declare the same module
    pub strict_duplicates: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root_dir_name: "rtl".to_string(),
        }
    }
}

impl Default for TopConfig {
    fn default() -> Self {
        Self {
            file: "site/SITE_0.sv".to_string(),
            module: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("merged_SITE_0.sv"),
            timescale: "1ns/1ps".to_string(),
        }
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["sv".to_string(), "svh".to_string()],
            header_extension: "svh".to_string(),
            testbench_suffixes: vec![
                "_tb.sv".to_string(),
                "tb_.sv".to_string(),
                "tb.sv".to_string(),
            ],
            excluded_suffixes: vec![".xlsx".to_string(), ".txt".to_string(), ".c".to_string()],
        }
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            root_package: "HelixPkg.sv".to_string(),
            package_dir: "pkg".to_string(),
            root_header: "Types.svh".to_string(),
            shared_header_markers: vec!["cordic".to_string(), "incl".to_string()],
            strict_duplicates: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Lookup order: `explicit`, then `$SVMERGE_CONFIG`, then `./svmerge.toml`.
    /// Falls back to defaults when none of them exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::from_file(local);
        }

        Ok(Config::default())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Top module name, derived from the top file stem when not set
    pub fn top_module(&self) -> String {
        if let Some(module) = &self.top.module {
            return module.clone();
        }
        Path::new(&self.top.file)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.top.file.clone())
    }
}
