mod json;
mod markdown;
mod text;

pub use json::*;
pub use text::{print_plan_summary, print_violations_summary};

use crate::error::Result;
use crate::types::{SemesterPlan, Violation, WeeklySchedule};
use std::fs;
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Writes a solved graduation plan to `output_dir` in every requested format.
pub fn generate_plan_reports(plan: &SemesterPlan, output_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    for format in formats {
        match format {
            OutputFormat::Json => fs::write(output_dir.join("plan.json"), json::generate_plan_report(plan)?)?,
            OutputFormat::Markdown => fs::write(output_dir.join("plan.md"), markdown::generate_plan_report(plan))?,
            OutputFormat::Text => fs::write(output_dir.join("plan.txt"), text::generate_plan_report(plan))?,
        }
    }
    Ok(())
}

/// Writes a diagnosis (the violations a request could not satisfy) to `output_dir`.
pub fn generate_violations_reports(violations: &[Violation], output_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    for format in formats {
        match format {
            OutputFormat::Json => {
                fs::write(output_dir.join("violations.json"), json::generate_violations_report(violations)?)?
            }
            OutputFormat::Markdown => fs::write(
                output_dir.join("violations.md"),
                markdown::generate_violations_report(violations),
            )?,
            OutputFormat::Text => {
                fs::write(output_dir.join("violations.txt"), text::generate_violations_report(violations))?
            }
        }
    }
    Ok(())
}

/// Writes a solved weekly timetable to `output_dir`.
pub fn generate_timetable_reports(schedule: &WeeklySchedule, output_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    for format in formats {
        match format {
            OutputFormat::Json => {
                fs::write(output_dir.join("timetable.json"), json::generate_timetable_report(schedule)?)?
            }
            OutputFormat::Markdown => fs::write(
                output_dir.join("timetable.md"),
                markdown::generate_timetable_report(schedule),
            )?,
            OutputFormat::Text => {
                fs::write(output_dir.join("timetable.txt"), text::generate_timetable_report(schedule))?
            }
        }
    }
    Ok(())
}
