//! Request validation: cheap checks that run before a model is ever built. Currently
//! a single rule -- a course pinned to more than one semester in the same request --
//! since the MILP's row-sum assumptions already catch this, but catching it here
//! lets us name the exact offending (course, count) pair instead of an opaque
//! "Course Taken At Most Once" row-sum violation.

use crate::types::{PlanRequest, Violation, ViolationCategory};
use std::collections::HashMap;

/// Scans `request.taken_in` for a course pinned into more than one semester and
/// returns one `CourseRepeated` violation per offending course. Empty means the
/// request is clean and the caller should proceed to build a model.
pub fn validate_request(request: &PlanRequest) -> Vec<Violation> {
    let mut counts: HashMap<&crate::types::CourseId, u32> = HashMap::new();
    for (course, _) in &request.taken_in {
        *counts.entry(course).or_insert(0) += 1;
    }

    let mut violations: Vec<Violation> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(course, count)| {
            let mut v = Violation::new(
                ViolationCategory::CourseRepeated,
                format!("{course} is pinned to {count} different semesters in this request"),
            );
            v.current = Some(count);
            v.contributing_courses = vec![course.clone()];
            v
        })
        .collect();

    violations.sort_by(|a, b| a.contributing_courses.cmp(&b.contributing_courses));
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CourseId;

    #[test]
    fn clean_request_has_no_violations() {
        let request = PlanRequest {
            taken_in: vec![(CourseId::from("csci1060u"), 1), (CourseId::from("csci2050u"), 2)],
            total_semesters: 8,
            ..Default::default()
        };
        assert!(validate_request(&request).is_empty());
    }

    #[test]
    fn repeated_course_is_reported_with_count() {
        let request = PlanRequest {
            taken_in: vec![
                (CourseId::from("csci1060u"), 1),
                (CourseId::from("csci1060u"), 2),
                (CourseId::from("csci1060u"), 3),
            ],
            total_semesters: 8,
            ..Default::default()
        };
        let violations = validate_request(&request);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].category, ViolationCategory::CourseRepeated);
        assert_eq!(violations[0].current, Some(3));
        assert_eq!(violations[0].contributing_courses, vec![CourseId::from("csci1060u")]);
    }
}
