mod course;
mod plan;
mod section;

pub use course::*;
pub use plan::*;
pub use section::*;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Newtype for course identifiers, e.g. `csci3070u`. All identifiers are lowercased
/// at construction so catalog/request lookups never have to normalize case twice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CourseId(pub String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        CourseId(s.to_lowercase())
    }
}

impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(CourseId(raw.to_lowercase()))
    }
}

/// Newtype for section identifiers (CRNs, kept as strings since some catalogs are non-numeric).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-indexed semester slot. `Semester::UNKNOWN.0 == total_semesters + 1` is reserved for
/// "not taken" and must never appear as the `taken_in` value of a taken course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Semester(pub u32);

impl Semester {
    pub fn unknown(total_semesters: u32) -> Semester {
        Semester(total_semesters + 1)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Year-standing thresholds, expressed in semester index (first=1, second=3, third=5, fourth=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    First,
    Second,
    Third,
    Fourth,
}

impl Standing {
    /// The minimum semester index at which this standing is considered met.
    pub fn threshold(self) -> u32 {
        match self {
            Standing::First => 1,
            Standing::Second => 3,
            Standing::Third => 5,
            Standing::Fourth => 7,
        }
    }

    pub fn parse(token: &str) -> Option<Standing> {
        match token {
            "first" => Some(Standing::First),
            "second" => Some(Standing::Second),
            "third" => Some(Standing::Third),
            "fourth" => Some(Standing::Fourth),
            _ => None,
        }
    }
}
