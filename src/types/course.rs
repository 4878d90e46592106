use super::CourseId;
use serde::{Deserialize, Serialize};

/// A prerequisite-style expression in disjunctive normal form: a list of conjunctive
/// clauses (outer OR, inner AND), each atom a raw string token. The core never parses
/// free text into this shape -- the catalog loader is expected to hand it over
/// pre-tokenized; `crate::dnf` only classifies the atoms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dnf(pub Vec<Vec<String>>);

impl Dnf {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clauses(&self) -> &[Vec<String>] {
        &self.0
    }
}

/// A single course row in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseId,
    pub program: String,
    pub year_level: u8,
    pub credit_hours: f64,
    #[serde(default)]
    pub pre_requisites: Dnf,
    #[serde(default)]
    pub co_requisites: Dnf,
    #[serde(default)]
    pub post_requisites: Dnf,
    /// Groups of mutually-exclusive course codes (cross-listings, retakes of an
    /// equivalent course under a different code); at most one per group may be taken.
    #[serde(default)]
    pub credit_restrictions: Vec<Vec<CourseId>>,
}

/// Whether a taken course counts against a program's required/one-of slots or the
/// free-elective quota. A taken course is exactly one of these, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseKind {
    Core,
    Elective,
}

/// Which subset of courses a `Filter` selects by "kind".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    Core,
    Elective,
    All,
}

/// A predicate over the catalog: narrows by program, year-level, explicit course list,
/// and/or core-vs-elective-vs-all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub course_names: Option<Vec<CourseId>>,
    #[serde(default)]
    pub programs: Option<Vec<String>>,
    #[serde(default)]
    pub year_levels: Option<Vec<u8>>,
    #[serde(default = "default_course_type")]
    pub course_type: CourseType,
}

fn default_course_type() -> CourseType {
    CourseType::All
}

/// A filter plus scaled credit-hour bounds. `name` doubles as the violation category
/// when this constraint is applied through the feasibility solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConstraint {
    pub name: String,
    pub filter: Filter,
    #[serde(default)]
    pub lte: Option<u32>,
    #[serde(default)]
    pub gte: Option<u32>,
}

/// A degree's requirements: mandatory courses, "one-of" groups, and credit-hour quotas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramMap {
    pub required_courses: Vec<CourseId>,
    pub one_of: Vec<Vec<CourseId>>,
    pub filter_constraints: Vec<FilterConstraint>,
}
