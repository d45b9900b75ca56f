use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Direction, Graph};
use std::collections::HashMap;
use std::path::Path;

use super::report::{GraphEdge, GraphNode, TrackedFile};

/// One node per tracked file, weighted by its relative path.
pub type ImportGraph = Graph<String, (), Directed>;

/// Collects tracked files and resolved import edges, then derives the
/// per-file neighbour lists once every edge is known.
pub struct GraphBuilder {
    graph: ImportGraph,
    node_map: HashMap<String, NodeIndex>,
    files: Vec<TrackedFile>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
            files: Vec::new(),
        }
    }

    pub fn with_capacity(files: usize) -> Self {
        Self {
            graph: Graph::with_capacity(files, files * 2),
            node_map: HashMap::with_capacity(files),
            files: Vec::with_capacity(files),
        }
    }

    /// Register a file. Adding the same path twice returns the existing node.
    pub fn add_file(&mut self, file: TrackedFile) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&file.path) {
            return index;
        }
        let index = self.graph.add_node(file.path.clone());
        self.node_map.insert(file.path.clone(), index);
        self.files.push(file);
        index
    }

    /// Add `source -> target`. Self-loops and unknown endpoints are rejected;
    /// repeated edges collapse onto the existing one.
    pub fn add_import(&mut self, source: &str, target: &str) -> Option<EdgeIndex> {
        let source_idx = *self.node_map.get(source)?;
        let target_idx = *self.node_map.get(target)?;
        if source_idx == target_idx {
            return None;
        }
        Some(self.graph.update_edge(source_idx, target_idx, ()))
    }

    /// Fill in `imports` / `imported_by` from the finished edge set.
    pub fn build(self) -> BuiltGraph {
        let GraphBuilder {
            graph,
            node_map,
            mut files,
        } = self;

        for file in &mut files {
            let Some(&index) = node_map.get(&file.path) else {
                continue;
            };
            file.imports = sorted_neighbors(&graph, index, Direction::Outgoing);
            file.imported_by = sorted_neighbors(&graph, index, Direction::Incoming);
        }

        BuiltGraph { graph, files }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_neighbors(graph: &ImportGraph, index: NodeIndex, direction: Direction) -> Vec<String> {
    let mut neighbors: Vec<String> = graph
        .neighbors_directed(index, direction)
        .map(|neighbor| graph[neighbor].clone())
        .collect();
    neighbors.sort();
    neighbors.dedup();
    neighbors
}

/// Finished graph plus the files with their neighbour lists filled in.
pub struct BuiltGraph {
    pub graph: ImportGraph,
    pub files: Vec<TrackedFile>,
}

impl BuiltGraph {
    pub fn nodes(&self) -> Vec<GraphNode> {
        self.files
            .iter()
            .map(|file| GraphNode {
                id: file.path.clone(),
                label: Path::new(&file.path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.path.clone()),
                size_mb: file.size_mb,
            })
            .collect()
    }

    /// Edges grouped by source in file order, targets sorted.
    pub fn links(&self) -> Vec<GraphEdge> {
        self.files
            .iter()
            .flat_map(|file| {
                file.imports.iter().map(move |target| GraphEdge {
                    source: file.path.clone(),
                    target: target.clone(),
                })
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
