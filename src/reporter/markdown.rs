use crate::types::{SemesterPlan, Violation, WeeklySchedule};
use chrono::Utc;

/// Generates a markdown report of a solved graduation plan.
pub fn generate_plan_report(plan: &SemesterPlan) -> String {
    let mut lines = vec![
        "# Graduation Plan".to_string(),
        String::new(),
        format!("Generated: {}", Utc::now().to_rfc3339()),
        String::new(),
        "## Summary\n".to_string(),
        "| Metric | Value |".to_string(),
        "|--------|-------|".to_string(),
        format!("| Total Courses | {} |", plan.courses_taken().count()),
        format!("| Total Semesters | {} |", plan.semesters.len()),
        format!(
            "| Unknown Prerequisites Activated | {} |",
            plan.activated_unknown_prerequisites.len()
        ),
        String::new(),
    ];

    for (semester, courses) in &plan.semesters {
        lines.push(format!("## Semester {semester}\n"));
        lines.push("| Course | Kind |".to_string());
        lines.push("|--------|------|".to_string());
        for (course, kind) in courses {
            lines.push(format!("| {course} | {kind:?} |"));
        }
        lines.push(String::new());
    }

    if !plan.activated_unknown_prerequisites.is_empty() {
        lines.push("## Unverifiable Prerequisites Assumed Met\n".to_string());
        for c in &plan.activated_unknown_prerequisites {
            lines.push(format!("- {c}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Generates a markdown report explaining why no plan could be found.
pub fn generate_violations_report(violations: &[Violation]) -> String {
    let mut lines = vec![
        "# Diagnosis Report".to_string(),
        String::new(),
        format!("Generated: {}", Utc::now().to_rfc3339()),
        String::new(),
    ];

    if violations.is_empty() {
        lines.push("No violations -- the request is feasible as given.".to_string());
        return lines.join("\n");
    }

    lines.push(format!("## {} Violation(s)\n", violations.len()));
    lines.push("| Category | Reason | Limit | Current | Courses |".to_string());
    lines.push("|----------|--------|-------|---------|---------|".to_string());
    for v in violations {
        let limit = match (v.lte, v.gte) {
            (Some(lte), _) => format!("<= {lte}"),
            (_, Some(gte)) => format!(">= {gte}"),
            _ => "-".to_string(),
        };
        let current = v.current.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
        let courses = v
            .contributing_courses
            .iter()
            .map(|c| c.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            v.category,
            v.reason.as_deref().unwrap_or("-"),
            limit,
            current,
            courses
        ));
    }

    lines.join("\n")
}

/// Generates a markdown report of a solved weekly timetable.
pub fn generate_timetable_report(schedule: &WeeklySchedule) -> String {
    let mut lines = vec![
        "# Weekly Timetable".to_string(),
        String::new(),
        format!("Generated: {}", Utc::now().to_rfc3339()),
        String::new(),
        format!("## {} Section(s)\n", schedule.sections_taken.len()),
    ];
    for s in &schedule.sections_taken {
        lines.push(format!("- {s}"));
    }
    lines.join("\n")
}
