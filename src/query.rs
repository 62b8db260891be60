use std::collections::HashSet;

use crate::error::ScanError;
use crate::normalize::{case_fold, normalize};

/// If A is the firstname and B is the lastname, we look for AB, BA, A;B,
/// B;A, and so on. Separators survive whitespace stripping, so each one
/// yields a distinct canonical form.
const NAME_SEPARATORS: [&str; 5] = ["", ";", ",", "_", "-"];

/// The person being searched for. Immutable once constructed; the name is
/// case-folded up front, the matriculation number and handle are kept raw
/// and normalized when the needle set is built.
#[derive(Debug, Clone)]
pub struct Query {
    firstname: String,
    lastname: String,
    matriculation: String,
    handle: String,
}

impl Query {
    /// Build a query from the three identity keys.
    ///
    /// `name` must consist of exactly two whitespace-separated tokens, in
    /// either `Firstname Lastname` or `Lastname Firstname` order; variant
    /// generation covers both. Names with more than two parts (multi-word
    /// surnames, middle names) are not supported.
    pub fn new(name: &str, matriculation: &str, handle: &str) -> Result<Self, ScanError> {
        let folded = case_fold(name);
        let tokens: Vec<&str> = folded.split_whitespace().collect();
        let (firstname, lastname) = match tokens.as_slice() {
            &[first, last] => (first.to_owned(), last.to_owned()),
            _ => {
                return Err(ScanError::InvalidQuery(format!(
                    "expected a first and a last name separated by a space, got {name:?}"
                )))
            }
        };
        Ok(Self {
            firstname,
            lastname,
            matriculation: matriculation.to_owned(),
            handle: handle.to_owned(),
        })
    }

    /// The case-folded first name token.
    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    /// The case-folded last name token.
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// The closed set of canonical strings treated as "the name, in any
    /// order, separator, or markup form".
    ///
    /// Both orders are emitted per separator, plus the two structured-export
    /// field orders some learning-platform dumps wrap names in. Any of these
    /// appearing as a substring of a normalized haystack means the name
    /// occurs in that file.
    pub fn name_variants(&self) -> HashSet<String> {
        let (first, last) = (&self.firstname, &self.lastname);
        let mut variants = HashSet::new();
        for sep in NAME_SEPARATORS {
            variants.insert(format!("{first}{sep}{last}"));
            variants.insert(format!("{last}{sep}{first}"));
        }
        variants.insert(normalize(&format!(
            "<FAMILY_NAME_OF_STUDENT>{last}</FAMILY_NAME_OF_STUDENT>\
             <FIRST_NAME_OF_STUDENT>{first}</FIRST_NAME_OF_STUDENT>"
        )));
        variants.insert(normalize(&format!(
            "<FIRST_NAME_OF_STUDENT>{first}</FIRST_NAME_OF_STUDENT>\
             <FAMILY_NAME_OF_STUDENT>{last}</FAMILY_NAME_OF_STUDENT>"
        )));
        variants
    }

    /// Compute the needle sets once, before the scan starts.
    pub(crate) fn needles(&self) -> Needles {
        Needles {
            name_variants: self.name_variants(),
            // Some CSV exports drop the leading zeros of the matriculation
            // number, so the needle drops them too.
            matriculation: normalize(&self.matriculation)
                .trim_start_matches('0')
                .to_owned(),
            handle: normalize(&self.handle),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}

/// The normalized needle sets, computed once per scan and immutable after.
pub(crate) struct Needles {
    pub name_variants: HashSet<String>,
    pub matriculation: String,
    pub handle: String,
    pub firstname: String,
    pub lastname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> Query {
        Query::new("John Doe", "01234567", "ab12cde").unwrap()
    }

    #[test]
    fn both_orders_without_separator() {
        let variants = query().name_variants();
        assert!(variants.contains("johndoe"));
        assert!(variants.contains("doejohn"));
    }

    #[test]
    fn symmetric_per_separator() {
        let variants = query().name_variants();
        for sep in NAME_SEPARATORS {
            assert_eq!(
                variants.contains(&format!("john{sep}doe")),
                variants.contains(&format!("doe{sep}john")),
            );
        }
    }

    #[test]
    fn markup_forms_are_normalized() {
        let variants = query().name_variants();
        assert!(variants.contains(
            "<family_name_of_student>doe</family_name_of_student>\
             <first_name_of_student>john</first_name_of_student>"
        ));
        assert!(variants.contains(
            "<first_name_of_student>john</first_name_of_student>\
             <family_name_of_student>doe</family_name_of_student>"
        ));
    }

    #[test]
    fn name_is_case_folded_at_construction() {
        let upper = Query::new("JOHN DOE", "1", "h").unwrap();
        assert_eq!(upper.name_variants(), query().name_variants());
    }

    #[test]
    fn matriculation_needle_drops_leading_zeros() {
        let needles = Query::new("John Doe", "007", "h").unwrap().needles();
        assert_eq!(needles.matriculation, "7");
    }

    #[test]
    fn rejects_single_token_name() {
        assert!(Query::new("Doe", "1", "h").is_err());
    }

    #[test]
    fn rejects_three_token_name() {
        assert!(Query::new("John van Doe", "1", "h").is_err());
    }
}
