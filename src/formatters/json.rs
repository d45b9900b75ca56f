use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::Report;

/// JSON output for a [`Report`].
///
/// The full form is the report itself with camelCase keys. The compact form
/// keeps the graph only: a path table plus `[source, target]` index pairs.
pub struct JsonFormatter {
    compact: bool,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            compact: false,
            pretty: true,
        }
    }

    pub fn compact() -> Self {
        Self {
            compact: true,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, report: &Report, output_path: &Path) -> Result<()> {
        let json_content = self.format_report(report)?;
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn format_report(&self, report: &Report) -> Result<String> {
        let value = if self.compact {
            self.compact_value(report)
        } else {
            serde_json::to_value(report)?
        };

        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    fn compact_value(&self, report: &Report) -> serde_json::Value {
        let file_ids: HashMap<&str, usize> = report
            .graph_nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.id.as_str(), id))
            .collect();

        let files: Vec<_> = report
            .graph_nodes
            .iter()
            .map(|node| json!([node.id, node.size_mb]))
            .collect();

        let edges: Vec<_> = report
            .graph_links
            .iter()
            .filter_map(|link| {
                let source = file_ids.get(link.source.as_str())?;
                let target = file_ids.get(link.target.as_str())?;
                Some(json!([source, target]))
            })
            .collect();

        let critical: Vec<_> = report
            .critical_files
            .iter()
            .filter_map(|path| file_ids.get(path.as_str()))
            .collect();

        json!({
            "meta": {
                "workspace": report.workspace_name,
                "generated": report.generated_at.to_rfc3339(),
                "nodes": report.graph_nodes.len(),
                "edges": report.graph_links.len(),
                "main": report.main_file.as_deref().and_then(|main| file_ids.get(main)),
                "complete": report.complete,
                "format": "compact"
            },
            "files": files,
            "edges": edges,
            "critical": critical
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
