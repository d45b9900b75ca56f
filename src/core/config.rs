use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Extensions analyzed when no allow-list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".py", ".pyw", ".json", ".jsonc", ".html",
    ".htm", ".css", ".scss", ".sql", ".db", ".sqlite", ".yaml", ".yml", ".xml", ".vsix", ".exe",
    ".java", ".cs", ".go", ".rs", ".php", ".rb",
];

/// Extensions that stay active whatever the allow-list says, so entry-point
/// detection keeps working under narrow filters.
pub const ALWAYS_INCLUDED_EXTENSIONS: &[&str] = &[".exe"];

pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CRITICAL_LIMIT: usize = 12;

/// What a cancelled scan hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelPolicy {
    /// Return whatever was gathered, flagged as incomplete
    #[default]
    PartialReport,
    /// Return `ScanError::Cancelled`
    Abort,
}

/// Options supplied by the caller for one scan.
///
/// Every field is optional in TOML; missing keys take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Extension allow-list, case-insensitive, dot optional. Empty means
    /// [`DEFAULT_EXTENSIONS`].
    pub include_extensions: Vec<String>,
    /// Folder names excluded wherever they appear in a path.
    pub exclude_folders: Vec<String>,
    /// Explicit entry point, as a root-relative path.
    pub main_file: Option<String>,
    /// Reader threads; 0 lets rayon pick.
    pub workers: usize,
    pub read_timeout_ms: u64,
    pub critical_limit: usize,
    pub on_cancel: CancelPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude_folders: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "dist".to_string(),
                "out".to_string(),
            ],
            main_file: None,
            workers: 0,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            critical_limit: DEFAULT_CRITICAL_LIMIT,
            on_cancel: CancelPolicy::PartialReport,
        }
    }
}

impl ScanOptions {
    /// Load options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let options: ScanOptions = toml::from_str(&content)?;
        Ok(options)
    }

    pub fn with_include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_folders = folders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_main_file(mut self, main_file: impl Into<String>) -> Self {
        self.main_file = Some(main_file.into());
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    pub fn with_on_cancel(mut self, policy: CancelPolicy) -> Self {
        self.on_cancel = policy;
        self
    }

    /// The configured main file with separators normalized, or `None` when blank.
    pub fn normalized_main_file(&self) -> Option<String> {
        self.main_file
            .as_deref()
            .map(|value| value.trim().replace('\\', "/"))
            .filter(|value| !value.is_empty())
    }

    /// Normalize the raw filter lists into lookup sets.
    pub fn filters(&self) -> ScanFilters {
        let mut extensions: HashSet<String> = self
            .include_extensions
            .iter()
            .filter_map(|ext| normalize_extension(ext))
            .collect();

        if extensions.is_empty() {
            extensions.extend(DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()));
        }
        extensions.extend(ALWAYS_INCLUDED_EXTENSIONS.iter().map(|ext| ext.to_string()));

        let excluded_folders = self
            .exclude_folders
            .iter()
            .map(|folder| folder.trim().trim_matches(|c| c == '/' || c == '\\').to_lowercase())
            .filter(|folder| !folder.is_empty())
            .collect();

        ScanFilters {
            extensions,
            excluded_folders,
        }
    }
}

/// Lowercase, dot-prefixed extension, or `None` for blank input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('*').trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{lower}"))
    }
}

/// Normalized lookup sets derived from [`ScanOptions`].
#[derive(Debug, Clone, Default)]
pub struct ScanFilters {
    pub extensions: HashSet<String>,
    pub excluded_folders: HashSet<String>,
}

impl ScanFilters {
    pub fn is_extension_active(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// True when any segment of a forward-slash relative path is an excluded folder.
    pub fn is_excluded_path(&self, relative_path: &str) -> bool {
        relative_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .any(|segment| self.excluded_folders.contains(&segment.to_lowercase()))
    }
}
