use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    // Setup
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("not a directory")]
    InvalidRoot(PathBuf),

    // Runtime
    #[error("extraction capability unavailable: {0}")]
    Capability(String),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidRoot(p) | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the scan can continue after this error.
    ///
    /// Recoverable errors are per-file: an unreadable file is logged,
    /// skipped, and the scan keeps going.
    ///
    /// Fatal errors (malformed query, missing root directory, an extraction
    /// capability that cannot be reached at all) abort the scan as soon as
    /// they surface.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
