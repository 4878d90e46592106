use super::{CourseId, CourseKind, Semester};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A completed solve: which course lands in which semester, and as core or elective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemesterPlan {
    pub semesters: BTreeMap<u32, Vec<(CourseId, CourseKind)>>,
    /// Unknown-prerequisite assumptions the solver had to activate to find a plan.
    pub activated_unknown_prerequisites: Vec<CourseId>,
}

impl SemesterPlan {
    pub fn courses_taken(&self) -> impl Iterator<Item = &CourseId> {
        self.semesters.values().flat_map(|v| v.iter().map(|(c, _)| c))
    }

    pub fn semester_of(&self, course: &CourseId) -> Option<Semester> {
        self.semesters.iter().find_map(|(sem, courses)| {
            courses
                .iter()
                .any(|(c, _)| c == course)
                .then_some(Semester(*sem))
        })
    }
}

/// Fixed enumeration of violation kinds the feasibility solver can report. Clients
/// render the variant plus the attached free-form reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationCategory {
    CourseTakenAtMostOnce,
    SemesterCourseLimit,
    OneOfRequirement,
    RequiredCourseMissing,
    PrerequisiteNotMet,
    CourseRepeated,
    /// Named after the `FilterConstraint` that was under- or over-subscribed.
    FilterQuota(String),
    InfeasibleModel,
}

impl std::fmt::Display for ViolationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationCategory::CourseTakenAtMostOnce => write!(f, "Course Taken At Most Once"),
            ViolationCategory::SemesterCourseLimit => write!(f, "Semester Course Limit"),
            ViolationCategory::OneOfRequirement => write!(f, "One of Requirement"),
            ViolationCategory::RequiredCourseMissing => write!(f, "Required Course Missing"),
            ViolationCategory::PrerequisiteNotMet => write!(f, "Prerequisite Not Met"),
            ViolationCategory::CourseRepeated => write!(f, "Course Repeated"),
            ViolationCategory::FilterQuota(name) => write!(f, "{name}"),
            ViolationCategory::InfeasibleModel => write!(f, "Infeasible Model"),
        }
    }
}

/// A single unmet requirement, surfaced instead of raising an exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub category: ViolationCategory,
    pub reason: Option<String>,
    pub lte: Option<u32>,
    pub gte: Option<u32>,
    pub current: Option<u32>,
    #[serde(default)]
    pub contributing_courses: Vec<CourseId>,
}

impl Violation {
    pub fn new(category: ViolationCategory, reason: impl Into<String>) -> Self {
        Self {
            category,
            reason: Some(reason.into()),
            lte: None,
            gte: None,
            current: None,
            contributing_courses: Vec::new(),
        }
    }
}

/// Everything the Graduation Requirements / Feasibility solvers need beyond the
/// catalog and program map: completed history and user overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Courses already completed, forced to `taken = 1` (semester unconstrained
    /// beyond "before now").
    #[serde(default)]
    pub completed_courses: Vec<CourseId>,
    /// Explicit placements: course -> semester, used both as hints and, for repeat
    /// detection, as the raw (course, semester) pairs a client submitted.
    #[serde(default)]
    pub taken_in: Vec<(CourseId, u32)>,
    #[serde(default)]
    pub course_ratings: Vec<(CourseId, i32)>,
    #[serde(default)]
    pub must_take: Vec<CourseId>,
    #[serde(default)]
    pub must_not_take: Vec<CourseId>,
    /// Total number of semesters in the plan horizon (N in `taken_in[c] in 1..=N+1`).
    pub total_semesters: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_category_display_matches_taxonomy() {
        assert_eq!(
            ViolationCategory::RequiredCourseMissing.to_string(),
            "Required Course Missing"
        );
        assert_eq!(
            ViolationCategory::FilterQuota("Science Electives".to_string()).to_string(),
            "Science Electives"
        );
    }

    #[test]
    fn semester_plan_finds_semester_of_course() {
        let mut plan = SemesterPlan::default();
        plan.semesters.insert(
            3,
            vec![(CourseId::from("csci3070u"), CourseKind::Core)],
        );
        assert_eq!(
            plan.semester_of(&CourseId::from("csci3070u")),
            Some(Semester(3))
        );
        assert_eq!(plan.semester_of(&CourseId::from("csci4000u")), None);
    }
}
