//! Containment matching of the needle sets against normalized haystacks.
//!
//! No regex, no fuzzy distance: a category is hit when its needle appears
//! anywhere as a substring. The matriculation and handle categories have a
//! single needle each; the name category is hit by any variant.

use std::path::Path;

use crate::query::Needles;
use crate::report::ScanReport;

/// Classify a fragment of normalized text: a spreadsheet cell, or a whole
/// document fed through [`classify_document`].
pub(crate) fn classify_fragment(
    fragment: &str,
    path: &Path,
    needles: &Needles,
    report: &mut ScanReport,
) {
    if fragment.contains(&needles.matriculation) {
        report.files_with_matriculation.insert(path.to_path_buf());
    }
    if fragment.contains(&needles.handle) {
        report.files_with_handle.insert(path.to_path_buf());
    }
    if contains_name(fragment, needles) {
        report.files_with_name.insert(path.to_path_buf());
    }
}

/// Classify a consolidated document-level text (plain text, PDF).
///
/// On top of the strict checks this applies the diagnostic fallback: when no
/// variant matched but both raw names appear independently, the file lands
/// in the possibly-name bucket. Spreadsheet cells never get this check
/// (known gap, kept as is).
pub(crate) fn classify_document(
    text: &str,
    path: &Path,
    needles: &Needles,
    report: &mut ScanReport,
) {
    classify_fragment(text, path, needles, report);
    if !contains_name(text, needles)
        && text.contains(&needles.firstname)
        && text.contains(&needles.lastname)
    {
        report.files_possibly_with_name.insert(path.to_path_buf());
    }
}

/// True when any name variant appears as a substring.
pub(crate) fn contains_name(fragment: &str, needles: &Needles) -> bool {
    needles.name_variants.iter().any(|v| fragment.contains(v.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use std::path::PathBuf;

    fn needles() -> Needles {
        Query::new("John Doe", "007", "ab12cde").unwrap().needles()
    }

    fn path() -> PathBuf {
        PathBuf::from("some/file.txt")
    }

    #[test]
    fn matriculation_is_needle_in_haystack() {
        // Needle "007" is normalized to "7"; a haystack keeping its zeros
        // still contains it.
        let mut report = ScanReport::new();
        classify_fragment("id=0007;", &path(), &needles(), &mut report);
        assert!(report.files_with_matriculation.contains(&path()));
    }

    #[test]
    fn strict_name_match_wins_over_fallback() {
        let mut report = ScanReport::new();
        classify_document("report:doe,john2024", &path(), &needles(), &mut report);
        assert!(report.files_with_name.contains(&path()));
        assert!(report.files_possibly_with_name.is_empty());
    }

    #[test]
    fn fallback_needs_both_names_without_a_variant() {
        let mut report = ScanReport::new();
        classify_document(
            "johnwrotethis.reviewedbysomeonenameddoelater",
            &path(),
            &needles(),
            &mut report,
        );
        assert!(report.files_with_name.is_empty());
        assert!(report.files_possibly_with_name.contains(&path()));

        let mut report = ScanReport::new();
        classify_document("onlyjohnhere", &path(), &needles(), &mut report);
        assert!(report.files_possibly_with_name.is_empty());
    }

    #[test]
    fn cell_fragments_have_no_fallback() {
        let mut report = ScanReport::new();
        classify_fragment("johnsomethingdoe", &path(), &needles(), &mut report);
        assert!(report.files_possibly_with_name.is_empty());
    }

    #[test]
    fn one_file_can_land_in_several_sets() {
        let mut report = ScanReport::new();
        classify_document("johndoe|7|ab12cde", &path(), &needles(), &mut report);
        assert!(report.files_with_name.contains(&path()));
        assert!(report.files_with_matriculation.contains(&path()));
        assert!(report.files_with_handle.contains(&path()));
    }
}
