use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::config::{CancelPolicy, ScanOptions};
use super::error::ScanError;
use super::graph::GraphBuilder;
use super::report::{bytes_to_mb, Report, TrackedFile};
use super::resolver::{normalize_lexically, FileIndex, ImportResolver};
use super::scanner::{DiscoveredFile, FileScanner};
use super::scorer::{rank_critical_files, select_main_file};
use super::tree::FolderNode;
use crate::extractors::{reader::read_with_deadline, LanguageClass};

/// Shared cancellation signal. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Specifiers pulled from one file, or `None` when the file was never read.
type Extraction = Option<BTreeSet<String>>;

/// Runs the whole pipeline for one root. Holds no state between runs.
pub struct ProjectAnalyzer {
    options: ScanOptions,
    file_scanner: FileScanner,
}

impl ProjectAnalyzer {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            file_scanner: FileScanner::new(),
        }
    }

    pub fn analyze(&self, root_path: &Path) -> Result<Report, ScanError> {
        self.analyze_with_cancel(root_path, &CancelFlag::new())
    }

    pub fn analyze_with_cancel(
        &self,
        root_path: &Path,
        cancel: &CancelFlag,
    ) -> Result<Report, ScanError> {
        let started = Instant::now();
        let root = resolve_root(root_path)?;
        let filters = self.options.filters();

        info!("Scanning files under {}", root.display());
        let inventory = self
            .file_scanner
            .scan_directory_with_cancel(&root, &filters, cancel);
        info!(
            "Found {} files, {} analyzable",
            inventory.total_files,
            inventory.files.len()
        );

        let extractions = self.extract_all(&inventory.files, cancel)?;
        let mut complete = inventory.complete && extractions.iter().all(Option::is_some);

        if !complete || cancel.is_cancelled() {
            complete = false;
            if self.options.on_cancel == CancelPolicy::Abort {
                return Err(ScanError::Cancelled);
            }
            warn!("Scan cancelled; assembling partial report");
        }

        // Resolution needs the complete index, so it only starts here
        let resolver = ImportResolver::new(root.clone(), FileIndex::from_files(&inventory.files));
        let targets: Vec<Vec<usize>> = inventory
            .files
            .par_iter()
            .zip(extractions.par_iter())
            .enumerate()
            .map(|(position, (file, specifiers))| match specifiers {
                Some(specifiers) => resolver.resolve_all(
                    LanguageClass::from_extension(&file.extension),
                    specifiers.iter().map(String::as_str),
                    &file.absolute_path,
                    position,
                ),
                None => Vec::new(),
            })
            .collect();

        let mut builder = GraphBuilder::with_capacity(inventory.files.len());
        for file in &inventory.files {
            builder.add_file(TrackedFile::new(
                file.relative_path.clone(),
                file.extension.clone(),
                file.size_bytes,
            ));
        }
        for (file, file_targets) in inventory.files.iter().zip(&targets) {
            for &target in file_targets {
                builder.add_import(&file.relative_path, &inventory.files[target].relative_path);
            }
        }
        let built = builder.build();
        info!(
            "Built import graph: {} nodes, {} edges",
            built.files.len(),
            built.edge_count()
        );

        let configured_main = self.options.normalized_main_file();
        let main_file = select_main_file(&built.files, configured_main.as_deref());
        let main_file_size_mb = main_file
            .as_deref()
            .and_then(|main| built.files.iter().find(|file| file.path == main))
            .map(|file| file.size_mb);

        let critical_entries =
            rank_critical_files(&built.files, main_file.as_deref(), self.options.critical_limit);
        let critical_files = critical_entries.iter().map(|e| e.path.clone()).collect();

        let graph_nodes = built.nodes();
        let graph_links = built.links();
        let analyzed_size_bytes: u64 = built.files.iter().map(|file| file.size_bytes).sum();

        let mut files = built.files;
        files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));

        let report = Report {
            workspace_name: workspace_name(&root),
            root_path: root.display().to_string(),
            generated_at: chrono::Utc::now(),
            total_files: inventory.total_files,
            total_size_mb: bytes_to_mb(inventory.total_size_bytes),
            analyzed_files: files.len(),
            analyzed_size_mb: bytes_to_mb(analyzed_size_bytes),
            main_file,
            main_file_size_mb,
            folder_tree: FolderNode::from_paths(&inventory.visible_paths),
            files,
            graph_nodes,
            graph_links,
            critical_files,
            critical_entries,
            complete,
        };

        info!("Analysis finished in {:.2}s", started.elapsed().as_secs_f64());
        Ok(report)
    }

    /// Read and extract every file on a bounded pool. Collecting by index is
    /// the barrier before resolution.
    fn extract_all(
        &self,
        files: &[DiscoveredFile],
        cancel: &CancelFlag,
    ) -> Result<Vec<Extraction>, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .thread_name(|i| format!("projgraph-reader-{i}"))
            .build()?;
        let timeout = Duration::from_millis(self.options.read_timeout_ms);

        Ok(pool.install(|| {
            files
                .par_iter()
                .map(|file| extract_file(file, timeout, cancel))
                .collect()
        }))
    }
}

fn extract_file(file: &DiscoveredFile, timeout: Duration, cancel: &CancelFlag) -> Extraction {
    if cancel.is_cancelled() {
        return None;
    }

    let class = LanguageClass::from_extension(&file.extension);
    if !class.has_imports() {
        return Some(BTreeSet::new());
    }

    match read_with_deadline(&file.absolute_path, timeout, cancel) {
        Ok(content) => {
            let specifiers = class.extract_imports(&content);
            debug!("{}: {} specifiers", file.relative_path, specifiers.len());
            Some(specifiers)
        }
        Err(err) if cancel.is_cancelled() => {
            debug!("{}: read abandoned: {err}", file.relative_path);
            None
        }
        Err(err) => {
            warn!("Failed to read {}: {err}", file.absolute_path.display());
            Some(BTreeSet::new())
        }
    }
}

fn resolve_root(root_path: &Path) -> Result<PathBuf, ScanError> {
    let absolute = if root_path.is_absolute() {
        root_path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|_| ScanError::NoRoot(root_path.to_path_buf()))?
            .join(root_path)
    };
    let root = normalize_lexically(&absolute);

    if !root.is_dir() {
        return Err(ScanError::NoRoot(root_path.to_path_buf()));
    }
    Ok(root)
}

fn workspace_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
