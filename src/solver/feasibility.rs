//! Feasibility / Diagnosis Solver: builds the same skeleton as the planner but leaves
//! every assumption free, maximizing their sum. Any assumption the solver lets fall to
//! zero names one reason the request, as given, cannot produce a plan.

use crate::catalog::CourseCatalog;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::model::ModelBuilder;
use crate::parser::validate_request;
use crate::solver::skeleton::{build_skeleton, FilterBound, RequirementsModel};
use crate::types::{PlanRequest, ProgramMap, Violation, ViolationCategory};
use good_lp::{Expression, Solution};

/// Builds and solves the Feasibility model, returning one `Violation` per unmet rule.
/// An empty result here would be a contradiction with the planner reporting
/// infeasible -- both solvers share the same skeleton, so that should never happen in
/// practice; if the backend itself can't find any feasible relaxation we fall back to
/// a single `InfeasibleModel` violation rather than silently returning nothing.
pub fn diagnose(
    catalog: &CourseCatalog,
    program_map: &ProgramMap,
    request: &PlanRequest,
    config: &SolverConfig,
) -> Result<Vec<Violation>> {
    let repeats = validate_request(request);
    if !repeats.is_empty() {
        return Ok(repeats);
    }

    let mut builder = ModelBuilder::new();
    let model = build_skeleton(
        &mut builder,
        catalog,
        program_map,
        request,
        config.default_semester_course_limit,
        config.credit_hour_scale,
        true,
    );

    let objective: Expression = model.all_assumptions().into_iter().map(Expression::from).sum();

    let solution = builder.solve_maximize(objective, config.diagnose_time_limit_secs, config.optimality_gap)?;

    let Some(solution) = solution else {
        return Ok(vec![Violation::new(
            ViolationCategory::InfeasibleModel,
            "no relaxation of this program's rules admits any valid assignment",
        )]);
    };

    Ok(decode_violations(catalog, &model, &solution))
}

fn decode_violations(catalog: &CourseCatalog, model: &RequirementsModel, solution: &impl Solution) -> Vec<Violation> {
    let mut out = Vec::new();

    for (course, var) in &model.row_sum_assumptions {
        if solution.value(*var) < 0.5 {
            out.push(Violation::new(
                ViolationCategory::CourseTakenAtMostOnce,
                format!("{course} is scheduled into more than one semester"),
            ));
        }
    }

    for (semester, var) in &model.semester_limit_assumptions {
        if solution.value(*var) < 0.5 {
            out.push(Violation::new(
                ViolationCategory::SemesterCourseLimit,
                format!("semester {semester} exceeds the maximum number of courses"),
            ));
        }
    }

    for (group, var) in &model.one_of_assumptions {
        if solution.value(*var) < 0.5 {
            let names = group.iter().map(|c| c.0.as_str()).collect::<Vec<_>>().join(", ");
            let mut v = Violation::new(ViolationCategory::OneOfRequirement, format!("none of [{names}] is taken"));
            v.contributing_courses = group.clone();
            out.push(v);
        }
    }

    for (course, var) in &model.required_assumptions {
        if solution.value(*var) < 0.5 {
            let mut v = Violation::new(
                ViolationCategory::RequiredCourseMissing,
                format!("{course} is required but not taken as a core course"),
            );
            v.contributing_courses = vec![course.clone()];
            out.push(v);
        }
    }

    for p in &model.prereq_assumptions {
        if solution.value(p.var) < 0.5 {
            let mut v = Violation::new(
                ViolationCategory::PrerequisiteNotMet,
                format!("{}'s {} is not satisfied", p.course, p.kind),
            );
            v.contributing_courses = vec![p.course.clone()];
            out.push(v);
        }
    }

    for f in &model.filter_assumptions {
        if solution.value(f.var) < 0.5 {
            let contributing: Vec<_> = f
                .matched
                .iter()
                .filter(|c| {
                    let taken_var = match f.course_type {
                        crate::types::CourseType::All => model.taken.get(c),
                        crate::types::CourseType::Core => model.taken_as_core.get(c),
                        crate::types::CourseType::Elective => model.taken_as_elective.get(c),
                    };
                    taken_var.map(|&v| solution.value(v) > 0.5).unwrap_or(false)
                })
                .cloned()
                .collect();
            let current: f64 = contributing
                .iter()
                .map(|c| catalog.get(c).map(|course| course.credit_hours).unwrap_or(0.0))
                .sum();

            let mut v = Violation::new(
                ViolationCategory::FilterQuota(f.name.clone()),
                match f.bound {
                    FilterBound::Lte => format!("{} exceeds its at-most-{} credit hour quota", f.name, f.limit),
                    FilterBound::Gte => format!("{} falls short of its at-least-{} credit hour quota", f.name, f.limit),
                },
            );
            match f.bound {
                FilterBound::Lte => v.lte = Some(f.limit),
                FilterBound::Gte => v.gte = Some(f.limit),
            }
            v.current = Some(current.round() as u32);
            v.contributing_courses = contributing;
            out.push(v);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Course, CourseId, Dnf};

    fn course(code: &str) -> Course {
        Course {
            code: CourseId::from(code),
            program: "computer-science".to_string(),
            year_level: 1,
            credit_hours: 3.0,
            pre_requisites: Dnf::default(),
            co_requisites: Dnf::default(),
            post_requisites: Dnf::default(),
            credit_restrictions: Vec::new(),
        }
    }

    #[test]
    fn missing_required_course_reports_violation() {
        let catalog = CourseCatalog::new(vec![course("csci1060u")]);
        let program_map = ProgramMap {
            required_courses: vec![CourseId::from("csci1060u"), CourseId::from("csci9999u")],
            one_of: Vec::new(),
            filter_constraints: Vec::new(),
        };
        let request = PlanRequest {
            total_semesters: 2,
            ..Default::default()
        };
        let config = SolverConfig::default();

        let violations = diagnose(&catalog, &program_map, &request, &config).unwrap();
        assert!(violations
            .iter()
            .any(|v| v.category == ViolationCategory::RequiredCourseMissing
                && v.contributing_courses == vec![CourseId::from("csci9999u")]));
    }

    #[test]
    fn fully_satisfiable_program_has_no_violations() {
        let catalog = CourseCatalog::new(vec![course("csci1060u")]);
        let program_map = ProgramMap {
            required_courses: vec![CourseId::from("csci1060u")],
            one_of: Vec::new(),
            filter_constraints: Vec::new(),
        };
        let request = PlanRequest {
            total_semesters: 2,
            ..Default::default()
        };
        let config = SolverConfig::default();

        let violations = diagnose(&catalog, &program_map, &request, &config).unwrap();
        assert!(violations.is_empty());
    }
}
