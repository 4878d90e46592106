use crate::types::{SemesterPlan, Violation, WeeklySchedule};
use colored::Colorize;

/// Generates a plain-text (colored-for-terminal) report of a solved graduation plan.
pub fn generate_plan_report(plan: &SemesterPlan) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               GRADUATION PLAN".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Total courses:    {}", plan.courses_taken().count()));
    lines.push(format!("Total semesters:  {}", plan.semesters.len()));
    if !plan.activated_unknown_prerequisites.is_empty() {
        lines.push(format!(
            "{} {}",
            "Assumed met:".yellow(),
            plan.activated_unknown_prerequisites.len()
        ));
    }
    lines.push(String::new());

    for (semester, courses) in &plan.semesters {
        lines.push(format!("{}", format!("Semester {semester}").bold()));
        lines.push("─".repeat(40));
        for (course, kind) in courses {
            let tag = match kind {
                crate::types::CourseKind::Core => "core".green(),
                crate::types::CourseKind::Elective => "elective".cyan(),
            };
            lines.push(format!("  {course} [{tag}]"));
        }
        lines.push(String::new());
    }

    lines.push("═".repeat(60));
    lines.join("\n")
}

/// Generates a plain-text report explaining why no plan could be found.
pub fn generate_violations_report(violations: &[Violation]) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    if violations.is_empty() {
        lines.push(format!("{}", "REQUEST IS FEASIBLE".green().bold()));
    } else {
        lines.push(format!("{}", "REQUEST IS INFEASIBLE".red().bold()));
    }
    lines.push("═".repeat(60));
    lines.push(String::new());

    for v in violations {
        lines.push(format!("{} {}", "!".red(), v.category));
        if let Some(reason) = &v.reason {
            lines.push(format!("    {reason}"));
        }
        if !v.contributing_courses.is_empty() {
            let courses = v
                .contributing_courses
                .iter()
                .map(|c| c.0.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("    courses: {courses}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Generates a plain-text report of a solved weekly timetable.
pub fn generate_timetable_report(schedule: &WeeklySchedule) -> String {
    let mut lines = Vec::new();
    lines.push("═".repeat(60));
    lines.push("               WEEKLY TIMETABLE".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());
    lines.push(format!("{} section(s)", schedule.sections_taken.len()));
    for s in &schedule.sections_taken {
        lines.push(format!("  {} {s}", "●".green()));
    }
    lines.push(String::new());
    lines.push("═".repeat(60));
    lines.join("\n")
}

/// Prints a quick summary to stdout.
pub fn print_plan_summary(plan: &SemesterPlan) {
    println!();
    println!("{}", "✓ Plan generated successfully".green().bold());
    println!();
    println!("  Courses:    {}", plan.courses_taken().count());
    println!("  Semesters:  {}", plan.semesters.len());
    if !plan.activated_unknown_prerequisites.is_empty() {
        println!(
            "  {} {}",
            "Assumed prerequisites:".yellow(),
            plan.activated_unknown_prerequisites.len()
        );
    }
    println!();
}

pub fn print_violations_summary(violations: &[Violation]) {
    println!();
    if violations.is_empty() {
        println!("{}", "✓ No violations".green().bold());
    } else {
        println!("{}", format!("✗ {} violation(s)", violations.len()).red().bold());
        for v in violations {
            println!("  ! {}", v.category);
        }
    }
    println!();
}
