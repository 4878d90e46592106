use crate::error::Result;
use crate::types::{SemesterPlan, Violation, WeeklySchedule};

/// Serializes a solved plan as-is -- every field on `SemesterPlan` is already the
/// shape a client wants.
pub fn generate_plan_report(plan: &SemesterPlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

pub fn generate_violations_report(violations: &[Violation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(violations)?)
}

pub fn generate_timetable_report(schedule: &WeeklySchedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

#[derive(serde::Serialize)]
pub struct PlanSummary {
    pub total_courses: usize,
    pub total_semesters: usize,
    pub unknown_prerequisites_activated: usize,
}

pub fn generate_plan_summary(plan: &SemesterPlan) -> Result<String> {
    let summary = PlanSummary {
        total_courses: plan.courses_taken().count(),
        total_semesters: plan.semesters.len(),
        unknown_prerequisites_activated: plan.activated_unknown_prerequisites.len(),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
