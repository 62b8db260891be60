//! Spreadsheet extraction: cell-by-cell classification with neighbor
//! pairing.
//!
//! Tabular exports routinely put a first name and a last name in adjacent
//! columns, so besides checking every cell on its own, each adjacent pair
//! of normalized cell values is checked concatenated against the
//! name-variant set. A pair hit marks the file as containing the name.

use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use tracing::warn;

use crate::classify::{classify_fragment, contains_name};
use crate::normalize::normalize;
use crate::query::Needles;
use crate::report::ScanReport;

/// Scan one workbook. Returns `false` when the file was skipped: a lock
/// artifact or a workbook that fails to open is a per-file problem, never
/// fatal to the scan.
pub(crate) fn scan_workbook(path: &Path, needles: &Needles, report: &mut ScanReport) -> bool {
    if is_lock_artifact(path) {
        warn!("{}: lock artifact, do not commit ~$ files!", path.display());
        return false;
    }
    let mut workbook: Xlsx<_> = match open_workbook(path) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!("could not open {}: {e}", path.display());
            return false;
        }
    };
    for sheet in workbook.sheet_names().to_vec() {
        if let Ok(range) = workbook.worksheet_range(&sheet) {
            for row in range.rows() {
                let cells: Vec<String> =
                    row.iter().map(|cell| normalize(&cell.to_string())).collect();
                scan_row(&cells, path, needles, report);
            }
        }
    }
    true
}

/// Classify one row of already-normalized cell values.
///
/// Every cell is checked against all three needle categories; every
/// adjacent pair is additionally checked, concatenated, against the name
/// variants. Boundary cells simply have fewer neighbors, not an error.
pub(crate) fn scan_row(cells: &[String], path: &Path, needles: &Needles, report: &mut ScanReport) {
    for cell in cells {
        classify_fragment(cell, path, needles, report);
    }
    for pair in cells.windows(2) {
        if contains_name(&format!("{}{}", pair[0], pair[1]), needles) {
            report.files_with_name.insert(path.to_path_buf());
        }
    }
}

/// Office writes transient `~$`-prefixed lock files next to open workbooks;
/// they are not real content.
fn is_lock_artifact(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.starts_with('~'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use std::path::PathBuf;

    fn needles() -> Needles {
        Query::new("Doe John", "99999", "xy9zzz").unwrap().needles()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| normalize(v)).collect()
    }

    fn path() -> PathBuf {
        PathBuf::from("roster.xlsx")
    }

    #[test]
    fn adjacent_cells_match_the_name() {
        let mut report = ScanReport::new();
        scan_row(&row(&["John", "Doe", "x"]), &path(), &needles(), &mut report);
        assert!(report.files_with_name.contains(&path()));
    }

    #[test]
    fn non_adjacent_cells_do_not_match() {
        let mut report = ScanReport::new();
        scan_row(&row(&["John", "x", "Doe"]), &path(), &needles(), &mut report);
        assert!(report.files_with_name.is_empty());
    }

    #[test]
    fn single_cell_rows_have_no_neighbors() {
        let mut report = ScanReport::new();
        scan_row(&row(&["JohnDoe"]), &path(), &needles(), &mut report);
        assert!(report.files_with_name.contains(&path()));

        let mut report = ScanReport::new();
        scan_row(&row(&["John"]), &path(), &needles(), &mut report);
        assert!(report.files_with_name.is_empty());
    }

    #[test]
    fn cells_hit_the_other_categories_too() {
        let mut report = ScanReport::new();
        scan_row(&row(&["x", "099999", "xy9zzz"]), &path(), &needles(), &mut report);
        assert!(report.files_with_matriculation.contains(&path()));
        assert!(report.files_with_handle.contains(&path()));
    }

    #[test]
    fn empty_neighbor_cells_cannot_bridge_a_gap() {
        // An empty cell normalizes to "", so concatenation adds nothing;
        // the pair check still only ever joins immediate neighbors.
        let mut report = ScanReport::new();
        scan_row(&row(&["John", "", "Doe"]), &path(), &needles(), &mut report);
        assert!(report.files_with_name.is_empty());
    }

    #[test]
    fn detects_lock_artifacts() {
        assert!(is_lock_artifact(Path::new("dir/~$roster.xlsx")));
        assert!(!is_lock_artifact(Path::new("dir/roster.xlsx")));
    }
}
