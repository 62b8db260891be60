use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

/// The accumulated outcome of a scan.
///
/// Four independent sets of file paths. A path may belong to several sets
/// at once, at most once per set. Accumulation order is irrelevant; the
/// sets are sorted only when the report is written.
#[derive(Debug)]
pub struct ScanReport {
    /// Files containing the name in one of its strict variant forms.
    pub files_with_name: HashSet<PathBuf>,

    /// Files containing the normalized login handle.
    pub files_with_handle: HashSet<PathBuf>,

    /// Files containing the normalized matriculation number.
    pub files_with_matriculation: HashSet<PathBuf>,

    /// Diagnostic bucket: both raw names present, but no strict variant.
    /// Only surfaced in the report when every strict category stayed empty.
    pub files_possibly_with_name: HashSet<PathBuf>,

    /// Scan statistics.
    pub stats: ScanStats,
}

/// Counters for a completed scan.
#[derive(Default, Debug)]
pub struct ScanStats {
    /// Files successfully extracted and classified.
    pub files: usize,

    /// Files skipped over a per-file problem (bad encoding, corrupt
    /// archive, empty extraction, lock artifact).
    pub skipped: usize,

    /// Wall-clock time from scan start to completion.
    pub duration: Duration,
}

impl ScanReport {
    pub(crate) fn new() -> Self {
        Self {
            files_with_name: HashSet::new(),
            files_with_handle: HashSet::new(),
            files_with_matriculation: HashSet::new(),
            files_possibly_with_name: HashSet::new(),
            stats: ScanStats::default(),
        }
    }

    /// Whether any strict category matched at all.
    pub fn found_any(&self) -> bool {
        !self.files_with_name.is_empty()
            || !self.files_with_handle.is_empty()
            || !self.files_with_matriculation.is_empty()
    }

    /// Write the categorized report.
    ///
    /// Fixed category order: name, login handle, matriculation number, and,
    /// only when all three strict categories are empty, the first-and-last-
    /// name fallback. Paths are sorted lexicographically by their string
    /// form and numbered from 1; empty categories print a not-found notice.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_category(w, &self.files_with_name, "name")?;
        write_category(w, &self.files_with_handle, "login handle")?;
        write_category(w, &self.files_with_matriculation, "matriculation number")?;
        if !self.found_any() {
            write_category(w, &self.files_possibly_with_name, "first and last name")?;
        }
        Ok(())
    }
}

fn write_category<W: Write>(w: &mut W, files: &HashSet<PathBuf>, label: &str) -> io::Result<()> {
    if files.is_empty() {
        return writeln!(w, "We haven't found the {label} in any file.");
    }
    writeln!(w, "The following files contain the {label} in any order:")?;
    let mut sorted: Vec<String> = files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    sorted.sort();
    for (i, file) in sorted.iter().enumerate() {
        writeln!(w, "{}. {}", i + 1, file)?;
    }
    Ok(())
}
