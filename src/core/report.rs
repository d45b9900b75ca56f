use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tree::FolderNode;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Megabytes rounded to three decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 1000.0).round() / 1000.0
}

/// One analyzed file and its import neighbourhood.
///
/// Neighbours are stored as paths, so the report has no reference cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedFile {
    pub path: String,
    pub extension: String,
    pub size_bytes: u64,
    pub size_mb: f64,
    pub imports: Vec<String>,
    pub imported_by: Vec<String>,
}

impl TrackedFile {
    pub fn new(path: impl Into<String>, extension: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            extension: extension.into(),
            size_bytes,
            size_mb: bytes_to_mb(size_bytes),
            imports: Vec::new(),
            imported_by: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Derived ranking row. `score` is `None` for the size-only fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalityEntry {
    pub path: String,
    pub inbound_count: usize,
    pub outbound_count: usize,
    pub size_bytes: u64,
    pub score: Option<f64>,
}

/// Snapshot of one scan, assembled once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub workspace_name: String,
    pub root_path: String,
    pub generated_at: DateTime<Utc>,
    pub total_files: usize,
    pub total_size_mb: f64,
    pub analyzed_files: usize,
    pub analyzed_size_mb: f64,
    pub main_file: Option<String>,
    pub main_file_size_mb: Option<f64>,
    pub folder_tree: FolderNode,
    pub files: Vec<TrackedFile>,
    pub graph_nodes: Vec<GraphNode>,
    pub graph_links: Vec<GraphEdge>,
    pub critical_files: Vec<String>,
    pub critical_entries: Vec<CriticalityEntry>,
    /// False when cancellation cut the scan short
    pub complete: bool,
}

impl Report {
    pub fn file(&self, path: &str) -> Option<&TrackedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}
