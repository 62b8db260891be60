//! Plain-text extraction (CSV, TXT, XML) with legacy-encoding fallback.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::normalize::normalize;

/// Read and normalize a text file. `None` means the file was skipped; the
/// reason is logged and the scan carries on.
pub(crate) fn extract(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Enumerated, then vanished before the read: a transient-file
            // race, not an error.
            debug!("{} disappeared before it could be read", path.display());
            return None;
        }
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("{} is not UTF-8, falling back to iso-8859-1", path.display());
            // The fallback order is ISO-8859-1 before CP1252. Latin-1
            // assigns a character to every byte value, so it always decodes
            // and the CP1252 leg would be dead code. Best-effort, not
            // charset detection.
            encoding_rs::mem::decode_latin1(e.as_bytes()).into_owned()
        }
    };
    Some(normalize(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn utf8_files_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "John  Doe\n").unwrap();
        assert_eq!(extract(&file).as_deref(), Some("johndoe"));
    }

    #[test]
    fn latin1_files_decode_via_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("legacy.csv");
        // "Müller;Hans" in ISO-8859-1: 0xFC is ü, invalid as UTF-8.
        fs::write(&file, b"M\xfcller;Hans\n").unwrap();
        assert_eq!(extract(&file).as_deref(), Some("müller;hans"));
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract(&dir.path().join("gone.txt")), None);
    }
}
