//! DNF Expression interpretation: the catalog loader hands us prerequisite/co-requisite/
//! post-requisite expressions already split into clauses of string atoms (outer OR,
//! inner AND, see [`crate::types::Dnf`]) -- this module only classifies each atom, it
//! never parses free text. Classification drives which dependent-variable constructor
//! the requirements solver assigns as the atom's witness.

use crate::types::{CourseId, Standing};

/// What a single DNF atom refers to once classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// A course code, e.g. `csci2050u`.
    Course(CourseId),
    /// A year-standing threshold, e.g. `third_year_standing`.
    Standing(Standing),
    /// A credit-hour threshold, e.g. `60_credit_hours` (n, in whole credit hours).
    CreditHours(u32),
    /// Neither of the above -- retained verbatim for the unknown-prerequisite path.
    Unknown(String),
}

/// Classify one DNF atom token. Mirrors the source's three regexes without depending
/// on a regex engine: course codes are `3-4 lowercase letters, 4 digits, trailing u`;
/// standing atoms are a fixed set of five suffixed words; credit-hour atoms are a
/// leading decimal run followed by `_credit_hours`.
pub fn classify_atom(token: &str) -> Atom {
    if let Some(standing) = parse_standing(token) {
        return Atom::Standing(standing);
    }
    if let Some(n) = parse_credit_hours(token) {
        return Atom::CreditHours(n);
    }
    if is_course_code(token) {
        return Atom::Course(CourseId::from(token));
    }
    Atom::Unknown(token.to_string())
}

fn parse_standing(token: &str) -> Option<Standing> {
    let level = token.strip_suffix("_year_standing")?;
    Standing::parse(level)
}

fn parse_credit_hours(token: &str) -> Option<u32> {
    let digits = token.strip_suffix("_credit_hours")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `^[a-z]{3,4}\d{4}u$`: 3-4 lowercase letters, 4 digits, trailing `u`.
fn is_course_code(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() < 8 || bytes.len() > 9 {
        return false;
    }
    if bytes[bytes.len() - 1] != b'u' {
        return false;
    }
    let digit_start = bytes.len() - 1 - 4;
    let letters = &bytes[..digit_start];
    let digits = &bytes[digit_start..bytes.len() - 1];
    (3..=4).contains(&letters.len())
        && letters.iter().all(|b| b.is_ascii_lowercase())
        && digits.iter().all(|b| b.is_ascii_digit())
}
