use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use crate::cache::{self, ExtractionCache, CACHE_FILE_NAME};
use crate::classify::classify_document;
use crate::document::TextExtraction;
use crate::error::ScanError;
use crate::normalize::normalize;
use crate::query::Needles;
use crate::report::ScanReport;
use crate::{sheet, text};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub root: PathBuf,
    pub needles: Needles,
    pub skip_documents: bool,
    pub skip_spreadsheets: bool,
    pub extraction: Box<dyn TextExtraction>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute a full scan over the root directory.
///
/// Phases run in a fixed order (documents, spreadsheets, plain text) and
/// never overlap. Processing is sequential: one file is fully extracted
/// and classified before the next begins. A failure in one file is
/// isolated to that file; only a capability-level failure aborts.
///
/// Called by `ScanBuilder::run()` after validating inputs.
pub(crate) fn run(opts: EngineOptions) -> Result<ScanReport, ScanError> {
    let start = Instant::now();
    let mut report = ScanReport::new();

    if opts.skip_documents {
        info!("skipping the PDF phase");
    } else {
        scan_documents(&opts, &mut report)?;
    }

    if opts.skip_spreadsheets {
        info!("skipping the XLSX phase");
    } else {
        scan_spreadsheets(&opts, &mut report);
    }

    scan_plain_text(&opts, &mut report);

    report.stats.duration = start.elapsed();
    info!(
        "scanned {} files ({} skipped) in {:.2?}",
        report.stats.files, report.stats.skipped, report.stats.duration
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

fn scan_documents(opts: &EngineOptions, report: &mut ScanReport) -> Result<(), ScanError> {
    let cache_path = opts.root.join(CACHE_FILE_NAME);
    let mut cache = ExtractionCache::load(&cache_path);

    let files = files_with_extensions(&opts.root, &["pdf"]);
    info!("starting the PDF scan over {} files", files.len());
    let bar = progress_bar(files.len(), "scanning PDFs");

    for path in &files {
        bar.inc(1);
        let key = cache::cache_key(path);
        if let Some(cached) = cache.get(&key) {
            debug!("{} found in the cache, skipping extraction", path.display());
            classify_document(cached, path, &opts.needles, report);
            report.stats.files += 1;
            continue;
        }
        debug!("{} was not in the cache", path.display());
        match opts.extraction.extract_text(path)? {
            Some(content) => {
                let normalized = normalize(&content);
                classify_document(&normalized, path, &opts.needles, report);
                cache.insert(key, normalized);
                report.stats.files += 1;
            }
            None => {
                error!("could not extract text from {}", path.display());
                // Remember the failure so future runs do not retry.
                cache.insert(key, String::new());
                report.stats.skipped += 1;
            }
        }
    }

    bar.finish_and_clear();
    cache.persist(&cache_path);
    info!("PDF scan: done");
    Ok(())
}

fn scan_spreadsheets(opts: &EngineOptions, report: &mut ScanReport) {
    let files = files_with_extensions(&opts.root, &["xlsx"]);
    info!("starting the XLSX scan over {} files", files.len());
    let bar = progress_bar(files.len(), "scanning XLSX");

    for path in &files {
        bar.inc(1);
        if sheet::scan_workbook(path, &opts.needles, report) {
            report.stats.files += 1;
        } else {
            report.stats.skipped += 1;
        }
    }

    bar.finish_and_clear();
    info!("XLSX scan: done");
}

fn scan_plain_text(opts: &EngineOptions, report: &mut ScanReport) {
    let files = files_with_extensions(&opts.root, &["csv", "txt", "xml"]);
    info!("starting the CSV, TXT, and XML scan over {} files", files.len());
    let bar = progress_bar(files.len(), "scanning text files");

    for path in &files {
        bar.inc(1);
        match text::extract(path) {
            Some(normalized) => {
                classify_document(&normalized, path, &opts.needles, report);
                report.stats.files += 1;
            }
            None => report.stats.skipped += 1,
        }
    }

    bar.finish_and_clear();
    info!("CSV, TXT, and XML scan: done");
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Collect every file under `root` whose extension matches one of
/// `extensions` (ASCII-case-insensitively).
///
/// The walk is serial and runs with the standard filters off: hidden
/// files and files listed in ignore files hold personal data like any
/// other file.
fn files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("walk error under {}: {e}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let wanted = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)));
        if wanted {
            files.push(entry.into_path());
        }
    }
    files
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_message(message);
    bar
}
