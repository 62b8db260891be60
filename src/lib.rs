//! # datasweep
//!
//! Find every file that mentions a person (PDF, XLSX, CSV/TXT/XML) for
//! data-protection audits.
//!
//! datasweep walks a directory tree and reports which files contain a
//! specific person, identified by three independent keys: the full name, a
//! matriculation number, and an institutional login handle. Matching is
//! substring containment over a normalized form (case-folded, quotes and
//! whitespace stripped), with a closed set of name variants covering both
//! name orders, common separators, and structured-export markup. It is
//! built for compliance audits over repositories too large to search by
//! hand; it never modifies the files it scans.
//!
//! # Quick Start
//!
//! ```rust
//! use datasweep::Query;
//!
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("roster.csv"), "doe;john;42\n")?;
//!
//! let report = datasweep::scan()
//!     .root(dir.path())
//!     .query(Query::new("John Doe", "01234567", "ab12cde")?)
//!     .skip_documents(true)
//!     .skip_spreadsheets(true)
//!     .run()?;
//!
//! assert_eq!(report.files_with_name.len(), 1);
//! report.write_to(&mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom Extraction Capabilities
//!
//! PDF text extraction runs in-process by default. Implement
//! [`TextExtraction`] to route documents through something else, such as
//! an extraction server, OCR, or a test double:
//!
//! ```rust
//! use std::path::Path;
//! use datasweep::{ScanError, TextExtraction};
//!
//! struct Stub;
//!
//! impl TextExtraction for Stub {
//!     fn extract_text(&self, _path: &Path) -> Result<Option<String>, ScanError> {
//!         Ok(Some("extracted text".into()))
//!     }
//! }
//! ```
//!
//! Extraction results are memoized per scanned directory in a JSON cache
//! file, so repeated sweeps of a large PDF set only pay the extraction
//! cost once.

#![forbid(unsafe_code)]

mod builder;
mod cache;
mod classify;
mod document;
mod engine;
mod error;
mod normalize;
mod query;
mod report;
mod sheet;
mod text;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScanBuilder;
pub use document::{PdfText, TextExtraction};
pub use error::ScanError;
pub use normalize::normalize;
pub use query::Query;
pub use report::{ScanReport, ScanStats};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ScanBuilder`] to configure and run a sweep.
///
/// # Example
///
/// ```rust
/// use datasweep::Query;
///
/// let dir = tempfile::tempdir()?;
/// let report = datasweep::scan()
///     .root(dir.path())
///     .query(Query::new("John Doe", "42", "ab12cde")?)
///     .skip_documents(true)
///     .run()?;
///
/// assert!(report.files_with_name.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scan() -> ScanBuilder {
    ScanBuilder::default()
}
