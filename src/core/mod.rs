pub mod analyzer;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod scorer;
pub mod session;
pub mod tree;

pub use analyzer::{CancelFlag, ProjectAnalyzer};
pub use config::{CancelPolicy, ScanFilters, ScanOptions};
pub use error::ScanError;
pub use graph::{GraphBuilder, ImportGraph};
pub use report::{CriticalityEntry, GraphEdge, GraphNode, Report, TrackedFile};
pub use resolver::{FileIndex, ImportResolver};
pub use scanner::{DiscoveredFile, FileScanner, ScanInventory};
pub use tree::FolderNode;
pub use session::ScanSession;
