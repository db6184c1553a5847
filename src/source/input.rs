//! Input resolution
//!
//! Turns a zip archive or an unpacked directory into an rtl root on disk.
//! Archive contents live in a scoped temporary directory that is removed
//! when the [`ResolvedInput`] is dropped.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::core::config::InputConfig;
use crate::core::error::{Error, Result};

/// Where the rtl tree comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Zip archive containing an rtl/ directory somewhere inside
    Archive(PathBuf),
    /// rtl/ directory already on disk
    Directory(PathBuf),
}

impl InputSource {
    /// Exactly one of `zip` or `rtl` must be given
    pub fn from_options(zip: Option<PathBuf>, rtl: Option<PathBuf>) -> Result<Self> {
        match (zip, rtl) {
            (Some(archive), None) => Ok(Self::Archive(archive)),
            (None, Some(dir)) => Ok(Self::Directory(dir)),
            (Some(_), Some(_)) => Err(Error::config(
                "--zip and --rtl are mutually exclusive; pass only one",
            )),
            (None, None) => Err(Error::config("one of --zip or --rtl is required")),
        }
    }

    /// Resolve to an rtl root, extracting archives first
    pub fn resolve(&self, config: &InputConfig) -> Result<ResolvedInput> {
        match self {
            Self::Archive(archive) => extract_archive(archive, &config.root_dir_name),
            Self::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(Error::InputNotFound { path: dir.clone() });
                }
                Ok(ResolvedInput {
                    root: dir.clone(),
                    scratch: None,
                })
            }
        }
    }
}

/// An rtl root ready for scanning
#[derive(Debug)]
pub struct ResolvedInput {
    root: PathBuf,
    /// Keeps extracted archive contents alive for the rest of the run
    scratch: Option<TempDir>,
}

impl ResolvedInput {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the root lives in a temporary extraction directory
    pub fn is_extracted(&self) -> bool {
        self.scratch.is_some()
    }
}

fn extract_archive(archive: &Path, dir_name: &str) -> Result<ResolvedInput> {
    if !archive.is_file() {
        return Err(Error::InputNotFound {
            path: archive.to_path_buf(),
        });
    }

    let scratch = tempfile::Builder::new().prefix("svmerge_rtl_").tempdir()?;
    let extract_dir = scratch.path().join("extract");
    std::fs::create_dir_all(&extract_dir)?;

    let mut zip = ZipArchive::new(File::open(archive)?)?;
    debug!(archive = %archive.display(), entries = zip.len(), "Extracting archive");
    zip.extract(&extract_dir)?;

    let root = find_root_dir(&extract_dir, dir_name)?.ok_or_else(|| Error::ArchiveRootNotFound {
        archive: archive.to_path_buf(),
        dir_name: dir_name.to_string(),
    })?;

    info!(root = %root.display(), "Extracted archive");

    Ok(ResolvedInput {
        root,
        scratch: Some(scratch),
    })
}

/// Shallowest directory named `dir_name` below `base`
fn find_root_dir(base: &Path, dir_name: &str) -> Result<Option<PathBuf>> {
    let mut best: Option<PathBuf> = None;

    for entry in WalkDir::new(base).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() || entry.file_name() != dir_name {
            continue;
        }

        let candidate = entry.into_path();
        let shorter = match &best {
            Some(current) => {
                let (a, b) = (candidate.as_os_str().len(), current.as_os_str().len());
                a < b || (a == b && candidate < *current)
            }
            None => true,
        };
        if shorter {
            best = Some(candidate);
        }
    }

    Ok(best)
}
