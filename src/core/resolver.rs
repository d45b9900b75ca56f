use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

use super::scanner::DiscoveredFile;
use crate::extractors::{LanguageClass, ECMASCRIPT_EXTENSIONS};

const PYTHON_MODULE_SUFFIXES: &[&str] = &[".py", ".pyw"];
const PYTHON_PACKAGE_INIT: &str = "__init__.py";

/// Lookup from normalized absolute path to tracked file position.
///
/// Keys are lexically normalized, use forward slashes and are lowercased, so
/// `Src\Util.TS` and `src/util.ts` name the same file.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    by_key: HashMap<String, usize>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files(files: &[DiscoveredFile]) -> Self {
        let mut index = Self {
            by_key: HashMap::with_capacity(files.len()),
        };
        for (position, file) in files.iter().enumerate() {
            index.insert(&file.absolute_path, position);
        }
        index
    }

    pub fn insert(&mut self, absolute_path: &Path, position: usize) {
        self.by_key.entry(path_key(absolute_path)).or_insert(position);
    }

    pub fn get(&self, candidate: &Path) -> Option<usize> {
        self.by_key.get(&path_key(candidate)).copied()
    }
}

/// Identity key for a path: normalized, forward slashes, lowercase.
pub fn path_key(path: &Path) -> String {
    normalize_lexically(path)
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

/// Collapse `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Maps raw specifiers to tracked files.
pub struct ImportResolver {
    root: PathBuf,
    index: FileIndex,
}

impl ImportResolver {
    pub fn new(root: impl Into<PathBuf>, index: FileIndex) -> Self {
        Self {
            root: root.into(),
            index,
        }
    }

    /// Resolve one specifier written in `importer` (an absolute path).
    pub fn resolve(&self, class: LanguageClass, specifier: &str, importer: &Path) -> Option<usize> {
        let importer_dir = importer.parent().unwrap_or(self.root.as_path());
        let resolved = match class {
            LanguageClass::EcmaScript => self.resolve_ecmascript(specifier, importer_dir),
            LanguageClass::Python => self.resolve_python(specifier, importer_dir),
            LanguageClass::None => None,
        };
        if resolved.is_none() {
            trace!("Unresolved import '{specifier}' in {}", importer.display());
        }
        resolved
    }

    /// Resolve a file's specifiers into a sorted, duplicate-free list of
    /// targets, never including the importer itself.
    pub fn resolve_all<'s, I>(
        &self,
        class: LanguageClass,
        specifiers: I,
        importer: &Path,
        importer_position: usize,
    ) -> Vec<usize>
    where
        I: IntoIterator<Item = &'s str>,
    {
        specifiers
            .into_iter()
            .filter_map(|specifier| self.resolve(class, specifier, importer))
            .filter(|&target| target != importer_position)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn resolve_ecmascript(&self, specifier: &str, importer_dir: &Path) -> Option<usize> {
        let base = if specifier.starts_with('.') {
            importer_dir.join(specifier)
        } else if specifier.starts_with('/') {
            self.root.join(specifier.trim_start_matches('/'))
        } else {
            // Package names and aliases are outside the tree
            return None;
        };

        std::iter::once(base.clone())
            .chain(ECMASCRIPT_EXTENSIONS.iter().map(|ext| with_suffix(&base, ext)))
            .chain(ECMASCRIPT_EXTENSIONS.iter().map(|ext| base.join(format!("index{ext}"))))
            .find_map(|candidate| self.index.get(&candidate))
    }

    fn resolve_python(&self, specifier: &str, importer_dir: &Path) -> Option<usize> {
        let dots = specifier.chars().take_while(|&c| c == '.').count();
        let module_path = specifier[dots..].replace('.', "/");

        if dots > 0 {
            // One dot is the importer's own package; each extra dot climbs one level
            let mut base_dir = importer_dir.to_path_buf();
            for _ in 1..dots {
                if !base_dir.pop() {
                    break;
                }
            }
            if module_path.is_empty() {
                return self.first_python_match(&base_dir);
            }
            return self.first_python_match(&base_dir.join(&module_path));
        }

        if module_path.is_empty() {
            return None;
        }

        self.first_python_match(&self.root.join(&module_path))
            .or_else(|| self.first_python_match(&importer_dir.join(&module_path)))
    }

    fn first_python_match(&self, base: &Path) -> Option<usize> {
        PYTHON_MODULE_SUFFIXES
            .iter()
            .map(|suffix| with_suffix(base, suffix))
            .chain(std::iter::once(base.join(PYTHON_PACKAGE_INIT)))
            .find_map(|candidate| self.index.get(&candidate))
    }
}
