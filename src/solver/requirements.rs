//! Graduation Requirements Solver: builds the full variable skeleton with every
//! assumption pinned to true (every rule is hard for the planner) and optimizes
//! toward the user's objective. When the solve fails -- infeasible or timed out --
//! the caller is expected to fall back to [`crate::solver::diagnose`] to explain why
//! (see `PlannerError` table, §7 of the design doc).

use crate::catalog::CourseCatalog;
use crate::config::SolverConfig;
use crate::error::{PlannerError, Result};
use crate::model::ModelBuilder;
use crate::parser::validate_request;
use crate::solver::skeleton::{build_skeleton, pin_assumptions};
use crate::types::{CourseKind, CourseId, PlanRequest, ProgramMap, SemesterPlan, Violation};
use good_lp::{Expression, Solution};

/// Outcome of a planning attempt. A genuine solver/backend failure is a `Result::Err`;
/// "no plan exists" is data, not an error (§7 propagation policy).
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    Plan(SemesterPlan),
    Infeasible(Vec<Violation>),
}

/// Builds and solves the Graduation Requirements model for `request`, falling back to
/// the diagnosis solver when no plan is found so the caller always has something
/// actionable to show.
pub fn plan(
    catalog: &CourseCatalog,
    program_map: &ProgramMap,
    request: &PlanRequest,
    config: &SolverConfig,
) -> Result<PlanOutcome> {
    let repeats = validate_request(request);
    if !repeats.is_empty() {
        return Ok(PlanOutcome::Infeasible(repeats));
    }

    let mut builder = ModelBuilder::new();
    let model = build_skeleton(
        &mut builder,
        catalog,
        program_map,
        request,
        config.default_semester_course_limit,
        config.credit_hour_scale,
        false,
    );
    pin_assumptions(&mut builder, &model);

    let unknowns = model.all_unknowns();
    let unknown_weight = (catalog.len() as f64 + 10.0) * 1_000.0;
    let unknown_term: Expression = unknowns.iter().map(|&v| Expression::from(v)).sum();

    let secondary: Expression = if !request.course_ratings.is_empty() {
        request
            .course_ratings
            .iter()
            .filter_map(|(code, rating)| model.taken.get(code).map(|&v| Expression::from(v) * (*rating as f64)))
            .sum()
    } else {
        let course_count: Expression = model.taken.values().map(|&v| Expression::from(v)).sum();
        Expression::from(0.0) - course_count
    };

    let objective = Expression::from(0.0) - unknown_term * unknown_weight + secondary;

    let solution = builder.solve_maximize(objective, config.plan_time_limit_secs, config.optimality_gap)?;

    let Some(solution) = solution else {
        let violations = super::feasibility::diagnose(catalog, program_map, request, config)?;
        return Ok(PlanOutcome::Infeasible(violations));
    };

    decode_plan(catalog, request.total_semesters, &model, &solution).map(PlanOutcome::Plan)
}

fn decode_plan(
    catalog: &CourseCatalog,
    total_semesters: u32,
    model: &crate::solver::skeleton::RequirementsModel,
    solution: &impl Solution,
) -> Result<SemesterPlan> {
    let mut plan = SemesterPlan::default();

    for course in catalog.iter() {
        let taken = solution.value(model.taken[&course.code]) > 0.5;
        if !taken {
            continue;
        }
        let ti = solution.value(model.taken_in[&course.code]).round() as u32;
        if ti == 0 || ti > total_semesters {
            return Err(PlannerError::InvariantViolation(format!(
                "taken_in[{}] = {ti} outside 1..={total_semesters} for a taken course",
                course.code
            )));
        }
        let kind = if solution.value(model.taken_as_core[&course.code]) > 0.5 {
            CourseKind::Core
        } else {
            CourseKind::Elective
        };
        plan.semesters.entry(ti).or_default().push((course.code.clone(), kind));
    }

    for (code, unknowns) in &model.unknown_prereq {
        if unknowns.iter().any(|&v| solution.value(v) > 0.5) {
            plan.activated_unknown_prerequisites.push(code.clone());
        }
    }
    plan.activated_unknown_prerequisites.sort();

    for semester_courses in plan.semesters.values_mut() {
        semester_courses.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(plan)
}

/// Re-exported for the CLI: forces the solved plan's placements as `take_class_in`
/// overrides on a fresh `PlanRequest`, for the "verify a plan has zero violations"
/// round-trip property (§8).
pub fn plan_to_request(plan: &SemesterPlan, total_semesters: u32) -> PlanRequest {
    let taken_in: Vec<(CourseId, u32)> = plan
        .semesters
        .iter()
        .flat_map(|(sem, courses)| courses.iter().map(move |(c, _)| (c.clone(), *sem)))
        .collect();
    PlanRequest {
        taken_in,
        total_semesters,
        ..Default::default()
    }
}
