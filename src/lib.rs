//! # PROJGRAPH
//!
//! Static import graph and file criticality map for source trees.
//!
//! PROJGRAPH walks a directory, pulls import specifiers out of each source file
//! with lightweight lexical patterns, resolves them to files inside the tree and
//! ranks the files that carry the most structural weight.
//!
//! ## Pipeline
//!
//! - **Scan**: enumerate regular files, apply folder exclusions and the extension allow-list
//! - **Extract**: per-file import specifiers (ECMAScript and Python families)
//! - **Resolve**: map specifiers to tracked files, dropping externals and self-imports
//! - **Graph**: import / imported-by adjacency, deduplicated and sorted
//! - **Score**: criticality ranking and entry-point selection
//!
//! The result is a single serializable [`Report`].

pub mod core;
pub mod extractors;
pub mod formatters;

pub use crate::core::{
    CancelFlag, CancelPolicy, ProjectAnalyzer, Report, ScanError, ScanOptions, ScanSession,
};
