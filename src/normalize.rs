//! Canonical comparison form for needles and haystacks.
//!
//! Matching is substring containment over this form, so everything that
//! should not distinguish two occurrences of the same value is erased here:
//! letter case (full Unicode case folding, so `ß` matches `SS`), quoting,
//! and whitespace. Internal whitespace goes too, which makes matching
//! insensitive to line wrapping and CSV column splits.

/// Map raw text to its canonical comparison form.
///
/// Case-folds, then removes every single/double quote and every whitespace
/// character. No other character class is altered. Pure and idempotent.
pub fn normalize(text: &str) -> String {
    case_fold(text)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"')
        .collect()
}

/// Full Unicode default case fold, not mere lowercasing: multi-character
/// fold forms (`ß` → `ss`) compare equal across locales.
pub(crate) fn case_fold(text: &str) -> String {
    caseless::default_case_fold_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_and_whitespace() {
        assert_eq!(normalize("  'John'\t\"Doe\"\n"), "johndoe");
    }

    #[test]
    fn folds_case_beyond_ascii() {
        assert_eq!(normalize("STRASSE"), normalize("Straße"));
    }

    #[test]
    fn idempotent() {
        for s in ["", "John Doe", "  'a' \"b\" \n c ", "Maße", "x;y,z"] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn case_fold_invariant() {
        let s = "JoHn DoE 123";
        let swapped: String = s
            .chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        assert_eq!(normalize(s), normalize(&swapped));
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(normalize("a;b,c_d-e<f>g:h"), "a;b,c_d-e<f>g:h");
    }

    #[test]
    fn total_on_empty_input() {
        assert_eq!(normalize(""), "");
    }
}
