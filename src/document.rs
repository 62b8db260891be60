use std::fs;
use std::panic;
use std::path::Path;

use tracing::warn;

use crate::error::ScanError;

/// The capability that turns a document file into raw text.
///
/// The scan engine treats this as an opaque service and only consumes it at
/// this boundary; swap in a test double or a remote extraction service via
/// [`ScanBuilder::with_extraction`](crate::ScanBuilder::with_extraction).
///
/// # Error Handling
///
/// The two failure modes are deliberately distinct:
///
/// - `Ok(None)`: this file yielded no text (scanned image, malformed
///   fonts, unreadable bytes). Transient: the engine logs it, caches the
///   empty result so future runs do not retry, and carries on.
/// - `Err`: the capability itself is unavailable (a remote service that
///   cannot be reached, a missing runtime). Fatal: the whole scan aborts.
pub trait TextExtraction: Send + Sync {
    /// Extract the raw text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<Option<String>, ScanError>;
}

/// The default capability: in-process PDF text extraction.
///
/// Runs entirely in-process, so it has no unavailable state and never
/// returns `Err`; every failure is per-file.
pub struct PdfText;

impl TextExtraction for PdfText {
    fn extract_text(&self, path: &Path) -> Result<Option<String>, ScanError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
                return Ok(None);
            }
        };
        // The extractor's font parsers can panic on malformed glyph data;
        // contain that to the file at hand.
        let extracted = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }));
        match extracted {
            Ok(Ok(text)) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(Ok(_)) => Ok(None),
            Ok(Err(e)) => {
                warn!("extraction failed for {}: {e}", path.display());
                Ok(None)
            }
            Err(_) => {
                warn!("extraction panicked on {}", path.display());
                Ok(None)
            }
        }
    }
}
