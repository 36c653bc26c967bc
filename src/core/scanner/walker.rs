//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ScanResult};
use crate::error::LoadError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
}

/// Recursive scanner over `walkdir`
pub struct WalkDirScanner {
    filter: ImageFilter,
}

impl WalkDirScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            filter: ImageFilter::new().with_hidden(config.include_hidden),
        }
    }

    /// Collect image files under every path.
    ///
    /// Directories are walked recursively. A path naming a file is taken
    /// as-is, whatever its extension. Missing paths and unreadable entries
    /// are reported in [`ScanResult::errors`]; the rest of the scan goes on.
    pub fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();

        for root in paths {
            if root.is_file() {
                result.files.push(root.clone());
            } else if root.is_dir() {
                self.scan_directory(root, &mut result);
            } else {
                warn!(path = %root.display(), "path not found");
                result.errors.push(LoadError::NotFound { path: root.clone() });
            }
        }

        result.files.sort();
        result.files.dedup();
        debug!(files = result.files.len(), errors = result.errors.len(), "scan complete");
        result
    }

    fn scan_directory(&self, root: &Path, result: &mut ScanResult) {
        let entries = WalkDir::new(root).into_iter().filter_entry(|entry| {
            // Never prune the root itself
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.filter.skips_hidden(name))
        });

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.filter.should_include(entry.path()) {
                        result.files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    warn!(path = %path.display(), error = %e, "failed to read entry");
                    result.errors.push(LoadError::Scan { path, source: e });
                }
            }
        }
    }
}
