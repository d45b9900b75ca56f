use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::analyzer::CancelFlag;
use super::config::ScanFilters;

/// A file that passed both the folder exclusions and the extension allow-list.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Root-relative, forward slashes, original casing
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Lowercase and dot-prefixed, empty when the file has none
    pub extension: String,
    pub size_bytes: u64,
}

/// Everything the walk learned about the tree.
#[derive(Debug, Clone, Default)]
pub struct ScanInventory {
    /// Every regular file found, before any exclusion
    pub total_files: usize,
    pub total_size_bytes: u64,
    /// Paths that survived folder exclusion, whatever their extension
    pub visible_paths: Vec<String>,
    pub files: Vec<DiscoveredFile>,
    /// False when the walk stopped early on cancellation
    pub complete: bool,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan_directory(&self, root_path: &Path, filters: &ScanFilters) -> ScanInventory {
        self.scan_directory_with_cancel(root_path, filters, &CancelFlag::new())
    }

    pub fn scan_directory_with_cancel(
        &self,
        root_path: &Path,
        filters: &ScanFilters,
        cancel: &CancelFlag,
    ) -> ScanInventory {
        let mut inventory = ScanInventory {
            complete: true,
            ..ScanInventory::default()
        };

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            if cancel.is_cancelled() {
                inventory.complete = false;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            // Symlinks report their own type here, so only real files pass
            if !entry.file_type().is_file() {
                continue;
            }

            let size_bytes = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    warn!("Skipping {}: {err}", entry.path().display());
                    continue;
                }
            };

            let Some(relative_path) = to_posix_relative(root_path, entry.path()) else {
                continue;
            };

            inventory.total_files += 1;
            inventory.total_size_bytes += size_bytes;

            if filters.is_excluded_path(&relative_path) {
                debug!("Excluded by folder filter: {relative_path}");
                continue;
            }

            inventory.visible_paths.push(relative_path.clone());

            let extension = file_extension(entry.path());
            if !filters.is_extension_active(&extension) {
                continue;
            }

            inventory.files.push(DiscoveredFile {
                relative_path,
                absolute_path: entry.path().to_path_buf(),
                extension,
                size_bytes,
            });
        }

        inventory
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Root-relative path with forward slashes; `None` for the root itself or
/// for paths outside it.
pub fn to_posix_relative(root: &Path, absolute: &Path) -> Option<String> {
    let relative = absolute.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Lowercase dot-prefixed extension, or an empty string.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/work/project");
        let file = root.join("src").join("lib").join("util.ts");
        assert_eq!(
            to_posix_relative(root, &file).as_deref(),
            Some("src/lib/util.ts")
        );
        assert_eq!(to_posix_relative(root, root), None);
    }

    #[test]
    fn extension_is_lowercased_and_dotted() {
        assert_eq!(file_extension(Path::new("App.TSX")), ".tsx");
        assert_eq!(file_extension(Path::new("Makefile")), "");
        assert_eq!(file_extension(Path::new("archive.tar.gz")), ".gz");
    }
}
