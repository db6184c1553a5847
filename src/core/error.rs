//! Error types for svmerge

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using svmerge's Error
pub type Result<T> = std::result::Result<T, Error>;

/// svmerge error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input path not found or unusable: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("No '{dir_name}' directory found inside {}. Check archive structure.", archive.display())]
    ArchiveRootNotFound { archive: PathBuf, dir_name: String },

    #[error("No SystemVerilog files found under {}", root.display())]
    NoSourceFiles { root: PathBuf },

    #[error("Could not locate top file {top_file} (module {top_module}) in rtl tree")]
    TopNotFound {
        top_file: String,
        top_module: String,
    },

    #[error("Module {module} is declared in both {first} and {second}")]
    DuplicateModule {
        module: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to write output: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
