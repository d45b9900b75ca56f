use std::path::{Path, PathBuf};

use super::analyzer::{CancelFlag, ProjectAnalyzer};
use super::config::ScanOptions;
use super::error::ScanError;
use super::report::Report;

/// Caller-owned scan state: the root, the options, and the most recent report.
///
/// A front end keeps one of these per open project and calls [`refresh`]
/// whenever it wants fresh data. Cancellation is requested through a handle
/// obtained from [`cancel_handle`].
///
/// [`refresh`]: ScanSession::refresh
/// [`cancel_handle`]: ScanSession::cancel_handle
pub struct ScanSession {
    root: PathBuf,
    analyzer: ProjectAnalyzer,
    cancel: CancelFlag,
    last_report: Option<Report>,
}

impl ScanSession {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            root: root.into(),
            analyzer: ProjectAnalyzer::new(options),
            cancel: CancelFlag::new(),
            last_report: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run a new scan and keep its report. A failed scan leaves the previous
    /// report in place.
    pub fn refresh(&mut self) -> Result<&Report, ScanError> {
        self.cancel.reset();
        let report = self.analyzer.analyze_with_cancel(&self.root, &self.cancel)?;
        Ok(self.last_report.insert(report))
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }
}
