use std::cmp::Ordering;
use std::path::Path;

use super::report::{CriticalityEntry, TrackedFile};

const INBOUND_WEIGHT: f64 = 3.0;
const OUTBOUND_WEIGHT: f64 = 1.5;
const ENTRY_BONUS: f64 = 5.0;

const ENTRY_FILE_NAMES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "extension.ts",
    "extension.js",
    "manifest.json",
    "theme.json",
    "launch.json",
    "index.html",
    "main.html",
    "app.html",
    "main.sql",
    "schema.sql",
];

const SOURCE_DIRECTORIES: &[&str] = &["/src/", "/core/", "/app/", "/extension/", "/database/"];
const ENTRY_TOKENS: &[&str] = &["main", "app", "dashboard", "start"];

fn extension_priority(extension: &str) -> u32 {
    match extension {
        ".exe" => 50,
        ".vsix" => 48,
        ".pyw" => 25,
        ".html" | ".htm" => 20,
        ".sql" | ".db" | ".sqlite" => 18,
        ".json" | ".jsonc" => 14,
        _ => 0,
    }
}

/// How strongly a file looks like the project's entry point.
pub fn main_file_priority(path: &str, extension: &str) -> u32 {
    let lower = path.to_lowercase();
    // Leading slash so top-level directories match the `/dir/` patterns
    let rooted = format!("/{lower}");
    let base_name = Path::new(&lower)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut score = extension_priority(extension);

    if ENTRY_FILE_NAMES.contains(&base_name.as_str()) {
        score += 35;
    }
    if SOURCE_DIRECTORIES.iter().any(|dir| rooted.contains(dir)) {
        score += 10;
    }
    if ENTRY_TOKENS.iter().any(|token| lower.contains(token)) {
        score += 15;
    }
    if lower.contains("core/") {
        score += 12;
    }

    score
}

/// Pick the entry point: an exact configured match, else the highest
/// priority file (larger first, then by path).
pub fn select_main_file(files: &[TrackedFile], configured: Option<&str>) -> Option<String> {
    if let Some(configured) = configured {
        if let Some(file) = files.iter().find(|file| file.path == configured) {
            return Some(file.path.clone());
        }
    }

    files
        .iter()
        .map(|file| (main_file_priority(&file.path, &file.extension), file))
        .max_by(|(pa, a), (pb, b)| {
            pa.cmp(pb)
                .then(a.size_bytes.cmp(&b.size_bytes))
                .then_with(|| b.path.cmp(&a.path))
        })
        .map(|(_, file)| file.path.clone())
}

pub fn criticality_score(inbound: usize, outbound: usize, size_bytes: u64, is_main: bool) -> f64 {
    let bonus = if is_main { ENTRY_BONUS } else { 0.0 };
    INBOUND_WEIGHT * inbound as f64
        + OUTBOUND_WEIGHT * outbound as f64
        + ((size_bytes + 1) as f64).log10()
        + bonus
}

fn by_rank(a: &CriticalityEntry, b: &CriticalityEntry) -> Ordering {
    let score_a = a.score.unwrap_or(0.0);
    let score_b = b.score.unwrap_or(0.0);
    score_b
        .total_cmp(&score_a)
        .then(b.inbound_count.cmp(&a.inbound_count))
        .then(b.size_bytes.cmp(&a.size_bytes))
        .then_with(|| a.path.cmp(&b.path))
}

/// Top `limit` files by criticality. When no file has an edge and there is
/// no main file, falls back to the largest files with no score.
pub fn rank_critical_files(
    files: &[TrackedFile],
    main_file: Option<&str>,
    limit: usize,
) -> Vec<CriticalityEntry> {
    let mut ranked: Vec<CriticalityEntry> = files
        .iter()
        .filter_map(|file| {
            let inbound = file.imported_by.len();
            let outbound = file.imports.len();
            let is_main = main_file == Some(file.path.as_str());
            if inbound == 0 && outbound == 0 && !is_main {
                return None;
            }
            Some(CriticalityEntry {
                path: file.path.clone(),
                inbound_count: inbound,
                outbound_count: outbound,
                size_bytes: file.size_bytes,
                score: Some(criticality_score(inbound, outbound, file.size_bytes, is_main)),
            })
        })
        .collect();

    if ranked.is_empty() {
        ranked = files
            .iter()
            .map(|file| CriticalityEntry {
                path: file.path.clone(),
                inbound_count: 0,
                outbound_count: 0,
                size_bytes: file.size_bytes,
                score: None,
            })
            .collect();
    }

    ranked.sort_by(by_rank);
    ranked.truncate(limit);
    ranked
}
