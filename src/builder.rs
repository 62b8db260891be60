use std::fs;
use std::path::PathBuf;

use crate::document::{PdfText, TextExtraction};
use crate::engine::{run, EngineOptions};
use crate::error::ScanError;
use crate::query::Query;
use crate::report::ScanReport;

// ---------------------------------------------------------------------------
// ScanBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a sweep.
///
/// Created via [`datasweep::scan()`](crate::scan). Configure with chained
/// builder methods, then call [`run()`](ScanBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let report = datasweep::scan()
///     .root("/srv/course-archive")
///     .query(query)
///     .skip_documents(true)
///     .run()?;
/// ```
pub struct ScanBuilder {
    root: Option<PathBuf>,
    query: Option<Query>,
    skip_documents: bool,
    skip_spreadsheets: bool,
    extraction: Option<Box<dyn TextExtraction>>,
}

impl Default for ScanBuilder {
    fn default() -> Self {
        Self {
            root: None,
            query: None,
            skip_documents: false,
            skip_spreadsheets: false,
            extraction: None,
        }
    }
}

impl ScanBuilder {
    // ── Inputs ────────────────────────────────────────────────────────────

    /// Set the directory to scan recursively. Must resolve to an existing
    /// directory when `run()` is called.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Set the person to search for.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Skip the document (PDF) phase. Text extraction dominates scan time,
    /// so a first pass often runs without it.
    pub fn skip_documents(mut self, yes: bool) -> Self {
        self.skip_documents = yes;
        self
    }

    /// Skip the spreadsheet (XLSX) phase.
    pub fn skip_spreadsheets(mut self, yes: bool) -> Self {
        self.skip_spreadsheets = yes;
        self
    }

    /// Replace the document text-extraction capability.
    ///
    /// Defaults to the in-process [`PdfText`](crate::PdfText) extractor.
    /// Tests inject call-counting doubles here; callers with an external
    /// extraction service plug it in the same way.
    pub fn with_extraction(mut self, capability: impl TextExtraction + 'static) -> Self {
        self.extraction = Some(Box::new(capability));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the scan and return the accumulated report.
    ///
    /// Blocks until every phase completes.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal setup errors (no query, root missing or not
    /// a directory) and for a capability-level extraction failure. Per-file
    /// problems never surface here; they are logged and the file skipped.
    pub fn run(self) -> Result<ScanReport, ScanError> {
        let root = self
            .root
            .ok_or_else(|| ScanError::InvalidRoot("no directory provided".into()))?;
        let root = fs::canonicalize(&root).map_err(|_| ScanError::InvalidRoot(root.clone()))?;
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(root));
        }

        let query = self
            .query
            .ok_or_else(|| ScanError::InvalidQuery("no query provided".into()))?;

        // Default capability: in-process PDF extraction
        let extraction = self.extraction.unwrap_or_else(|| Box::new(PdfText));

        run(EngineOptions {
            root,
            needles: query.needles(),
            skip_documents: self.skip_documents,
            skip_spreadsheets: self.skip_spreadsheets,
            extraction,
        })
    }
}
