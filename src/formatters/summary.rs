use anyhow::Result;
use std::fmt::Write as _;

use crate::core::{FolderNode, Report};

/// Plain-text overview: totals, entry point, critical files and the folder tree.
pub struct SummaryFormatter {
    include_tree: bool,
    /// Folder depth shown before collapsing into a count
    max_tree_depth: usize,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self {
            include_tree: true,
            max_tree_depth: 4,
        }
    }

    pub fn with_tree(mut self, include_tree: bool) -> Self {
        self.include_tree = include_tree;
        self
    }

    pub fn with_max_tree_depth(mut self, depth: usize) -> Self {
        self.max_tree_depth = depth;
        self
    }

    pub fn format_report(&self, report: &Report) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "# {}", report.workspace_name)?;
        writeln!(out, "root: {}", report.root_path)?;
        writeln!(out, "generated: {}", report.generated_at.to_rfc3339())?;
        if !report.complete {
            writeln!(out, "status: INCOMPLETE (scan cancelled)")?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "files: {} total ({:.3} MB), {} analyzed ({:.3} MB)",
            report.total_files, report.total_size_mb, report.analyzed_files, report.analyzed_size_mb
        )?;
        writeln!(
            out,
            "graph: {} nodes, {} edges",
            report.graph_nodes.len(),
            report.graph_links.len()
        )?;
        match (&report.main_file, report.main_file_size_mb) {
            (Some(main), Some(size)) => writeln!(out, "main: {main} ({size:.3} MB)")?,
            (Some(main), None) => writeln!(out, "main: {main}")?,
            _ => writeln!(out, "main: -")?,
        }
        writeln!(out)?;

        writeln!(out, "## Critical files")?;
        for (rank, entry) in report.critical_entries.iter().enumerate() {
            match entry.score {
                Some(score) => writeln!(
                    out,
                    "{:>2}. {} [in {}, out {}, score {:.2}]",
                    rank + 1,
                    entry.path,
                    entry.inbound_count,
                    entry.outbound_count,
                    score
                )?,
                None => writeln!(out, "{:>2}. {} [{} bytes]", rank + 1, entry.path, entry.size_bytes)?,
            }
        }

        if self.include_tree {
            writeln!(out)?;
            writeln!(out, "## Folder tree")?;
            self.write_tree(&mut out, &report.folder_tree, 0)?;
        }

        Ok(out)
    }

    fn write_tree(&self, out: &mut String, node: &FolderNode, depth: usize) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        for folder in &node.folders {
            if depth + 1 >= self.max_tree_depth {
                writeln!(out, "{indent}{}/ ({} files)", folder.name, folder.file_count())?;
            } else {
                writeln!(out, "{indent}{}/", folder.name)?;
                self.write_tree(out, folder, depth + 1)?;
            }
        }
        for file in &node.files {
            writeln!(out, "{indent}{file}")?;
        }
        Ok(())
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}
