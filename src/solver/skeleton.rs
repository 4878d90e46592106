//! Shared variable skeleton for the Graduation Requirements Solver and its
//! Feasibility/Diagnosis twin. Every rule that the diagnosis solver must be able to
//! report as a violation is reified behind an "assumption" boolean here; the planner
//! pins every assumption to true (the rule is hard), the diagnoser leaves them free
//! and maximizes their sum. Building both from one function keeps the two solvers
//! from silently drifting apart on what counts as a rule.

use crate::catalog::CourseCatalog;
use crate::depvars::DependentVariables;
use crate::dnf::{classify_atom, Atom};
use crate::model::{and_reif, implies_ge, implies_le, map_domain, or_reif, pinned, ModelBuilder};
use crate::types::{CourseId, CourseType, Dnf, Filter, PlanRequest, ProgramMap, Standing};
use good_lp::{constraint, Expression, Variable};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBound {
    Lte,
    Gte,
}

pub struct PrereqAssumption {
    pub course: CourseId,
    pub kind: &'static str,
    pub var: Variable,
}

pub struct FilterAssumption {
    pub name: String,
    pub bound: FilterBound,
    pub limit: u32,
    pub var: Variable,
    pub matched: Vec<CourseId>,
    pub course_type: CourseType,
}

/// Everything the requirements solvers decode from after `.solve()` returns.
pub struct RequirementsModel<'a> {
    pub catalog: &'a CourseCatalog,
    pub total_semesters: u32,
    pub credit_scale: i32,
    pub grid: HashMap<CourseId, Vec<Variable>>,
    pub taken: HashMap<CourseId, Variable>,
    pub taken_in: HashMap<CourseId, Variable>,
    pub taken_as_core: HashMap<CourseId, Variable>,
    pub taken_as_elective: HashMap<CourseId, Variable>,
    pub unknown_prereq: HashMap<CourseId, Vec<Variable>>,
    pub row_sum_assumptions: HashMap<CourseId, Variable>,
    pub semester_limit_assumptions: HashMap<u32, Variable>,
    pub one_of_assumptions: Vec<(Vec<CourseId>, Variable)>,
    pub required_assumptions: HashMap<CourseId, Variable>,
    pub prereq_assumptions: Vec<PrereqAssumption>,
    pub filter_assumptions: Vec<FilterAssumption>,
}

impl<'a> RequirementsModel<'a> {
    /// Every reified rule, i.e. everything the diagnostic objective sums and the
    /// planner pins to true. Deliberately excludes unknown-prerequisite booleans --
    /// those are always soft, in both solvers.
    pub fn all_assumptions(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        out.extend(self.row_sum_assumptions.values().copied());
        out.extend(self.semester_limit_assumptions.values().copied());
        out.extend(self.one_of_assumptions.iter().map(|(_, v)| *v));
        out.extend(self.required_assumptions.values().copied());
        out.extend(self.prereq_assumptions.iter().map(|p| p.var));
        out.extend(self.filter_assumptions.iter().map(|f| f.var));
        out
    }

    pub fn all_unknowns(&self) -> Vec<Variable> {
        self.unknown_prereq.values().flatten().copied().collect()
    }
}

#[derive(Clone, Copy)]
enum RequisiteKind {
    Pre,
    Co,
    Post,
}

impl RequisiteKind {
    fn label(self) -> &'static str {
        match self {
            RequisiteKind::Pre => "prerequisite",
            RequisiteKind::Co => "co-requisite",
            RequisiteKind::Post => "post-requisite",
        }
    }
}

/// Builds the full variable skeleton. `diagnostic` only affects which
/// `TakenBeforeOrConcurrently` variant co-requisites use (see `depvars`); whether
/// assumptions are pinned or left free is decided by the caller after this returns.
pub fn build_skeleton<'a>(
    builder: &mut ModelBuilder,
    catalog: &'a CourseCatalog,
    program_map: &ProgramMap,
    request: &PlanRequest,
    default_semester_limit: u32,
    credit_scale: i32,
    diagnostic: bool,
) -> RequirementsModel<'a> {
    let total_semesters = request.total_semesters;
    let mut grid: HashMap<CourseId, Vec<Variable>> = HashMap::new();
    let mut taken: HashMap<CourseId, Variable> = HashMap::new();
    let mut taken_in: HashMap<CourseId, Variable> = HashMap::new();
    let mut row_sum_assumptions = HashMap::new();

    for course in catalog.iter() {
        let row: Vec<Variable> = (0..total_semesters).map(|_| builder.new_bool()).collect();
        let taken_c = or_reif(builder, &row);
        let row_sum: Expression = row.iter().map(|&b| Expression::from(b)).sum();
        let row_ok = builder.new_bool();
        implies_le(builder, row_ok, row_sum, 1.0, total_semesters as f64);
        let ti = builder.new_int(1, total_semesters as i64 + 1);
        map_domain(builder, &row, ti, 1, total_semesters as i64 + 1);

        grid.insert(course.code.clone(), row);
        taken.insert(course.code.clone(), taken_c);
        taken_in.insert(course.code.clone(), ti);
        row_sum_assumptions.insert(course.code.clone(), row_ok);
    }

    let mut semester_limit_assumptions = HashMap::new();
    for s in 1..=total_semesters {
        let col_sum: Expression = catalog
            .codes()
            .map(|c| Expression::from(grid[c][(s - 1) as usize]))
            .sum();
        let limit = default_semester_limit;
        let ok = builder.new_bool();
        implies_le(builder, ok, col_sum, limit as f64, catalog.len() as f64);
        semester_limit_assumptions.insert(s, ok);
    }

    let mut taken_as_core = HashMap::new();
    let mut taken_as_elective = HashMap::new();
    for course in catalog.iter() {
        let core = builder.new_bool();
        let elective = builder.new_bool();
        let taken_c = taken[&course.code];
        builder.add_constraint(constraint!(
            Expression::from(core) + Expression::from(elective) == Expression::from(taken_c)
        ));
        taken_as_core.insert(course.code.clone(), core);
        taken_as_elective.insert(course.code.clone(), elective);
    }

    let mut dv = DependentVariables::new(catalog, &taken, &taken_in, total_semesters, credit_scale);
    let mut unknown_prereq: HashMap<CourseId, Vec<Variable>> = HashMap::new();
    let mut prereq_assumptions = Vec::new();

    for course in catalog.iter() {
        let taken_c = taken[&course.code];
        let mut course_unknowns = Vec::new();

        let pre_sat = dnf_satisfied(
            builder,
            &mut dv,
            &course.pre_requisites,
            &course.code,
            RequisiteKind::Pre,
            diagnostic,
            &mut course_unknowns,
        );
        push_requisite_assumption(builder, taken_c, pre_sat, &course.code, RequisiteKind::Pre, &mut prereq_assumptions);

        let co_sat = dnf_satisfied(
            builder,
            &mut dv,
            &course.co_requisites,
            &course.code,
            RequisiteKind::Co,
            diagnostic,
            &mut course_unknowns,
        );
        push_requisite_assumption(builder, taken_c, co_sat, &course.code, RequisiteKind::Co, &mut prereq_assumptions);

        let post_sat = dnf_satisfied(
            builder,
            &mut dv,
            &course.post_requisites,
            &course.code,
            RequisiteKind::Post,
            diagnostic,
            &mut course_unknowns,
        );
        push_requisite_assumption(builder, taken_c, post_sat, &course.code, RequisiteKind::Post, &mut prereq_assumptions);

        if !course_unknowns.is_empty() {
            unknown_prereq.insert(course.code.clone(), course_unknowns);
        }
    }

    let mut seen_restriction_groups: BTreeSet<Vec<CourseId>> = BTreeSet::new();
    for course in catalog.iter() {
        for group in &course.credit_restrictions {
            let mut key = group.clone();
            key.sort();
            if !seen_restriction_groups.insert(key.clone()) {
                continue;
            }
            let sum: Expression = key
                .iter()
                .filter_map(|c| taken.get(c).copied())
                .map(Expression::from)
                .sum();
            builder.add_constraint(constraint!(sum <= 1));
        }
    }

    let mut required_assumptions = HashMap::new();
    for r in &program_map.required_courses {
        let core_r = taken_as_core.get(r).copied().unwrap_or_else(|| pinned(builder, false));
        let ok = builder.new_bool();
        implies_ge(builder, ok, Expression::from(core_r), 1.0, 1.0);
        required_assumptions.insert(r.clone(), ok);
    }

    let mut one_of_assumptions = Vec::new();
    for group in &program_map.one_of {
        let sum: Expression = group
            .iter()
            .filter_map(|c| taken_as_core.get(c).copied())
            .map(Expression::from)
            .sum();
        let ok = builder.new_bool();
        implies_ge(builder, ok, sum.clone(), 1.0, group.len() as f64);
        builder.add_constraint(constraint!(sum <= 1 + (group.len() as f64) * (1.0 - ok)));
        one_of_assumptions.push((group.clone(), ok));
    }

    let mut filter_assumptions = Vec::new();
    for fc in &program_map.filter_constraints {
        let matched: Vec<CourseId> = catalog
            .iter()
            .filter(|c| filter_matches_static(&fc.filter, c))
            .map(|c| c.code.clone())
            .collect();
        let var_for = |code: &CourseId| -> Variable {
            match fc.filter.course_type {
                CourseType::All => taken[code],
                CourseType::Core => taken_as_core[code],
                CourseType::Elective => taken_as_elective[code],
            }
        };
        let scale = credit_scale as f64;
        let total_scaled: f64 = matched
            .iter()
            .map(|c| catalog.get(c).map(|course| course.credit_hours).unwrap_or(0.0) * scale)
            .sum();
        let sum: Expression = matched
            .iter()
            .map(|c| {
                let hours = catalog.get(c).map(|course| course.credit_hours).unwrap_or(0.0);
                Expression::from(var_for(c)) * (hours * scale)
            })
            .sum();

        if let Some(lte) = fc.lte {
            let ok = builder.new_bool();
            implies_le(builder, ok, sum.clone(), (lte as f64) * scale, total_scaled.max(1.0));
            filter_assumptions.push(FilterAssumption {
                name: fc.name.clone(),
                bound: FilterBound::Lte,
                limit: lte,
                var: ok,
                matched: matched.clone(),
                course_type: fc.filter.course_type,
            });
        }
        if let Some(gte) = fc.gte {
            let ok = builder.new_bool();
            implies_ge(builder, ok, sum.clone(), (gte as f64) * scale, total_scaled.max(1.0));
            filter_assumptions.push(FilterAssumption {
                name: fc.name.clone(),
                bound: FilterBound::Gte,
                limit: gte,
                var: ok,
                matched: matched.clone(),
                course_type: fc.filter.course_type,
            });
        }
    }

    apply_user_overrides(builder, catalog, request, &grid, &taken);

    RequirementsModel {
        catalog,
        total_semesters,
        credit_scale,
        grid,
        taken,
        taken_in,
        taken_as_core,
        taken_as_elective,
        unknown_prereq,
        row_sum_assumptions,
        semester_limit_assumptions,
        one_of_assumptions,
        required_assumptions,
        prereq_assumptions,
        filter_assumptions,
    }
}

/// Pins every reified assumption to true -- used by the planner, for which every
/// rule is hard. Unknown-prerequisite booleans are left alone; they stay soft.
pub fn pin_assumptions(builder: &mut ModelBuilder, model: &RequirementsModel) {
    for v in model.all_assumptions() {
        builder.add_constraint(constraint!(v == 1));
    }
}

fn dnf_satisfied(
    builder: &mut ModelBuilder,
    dv: &mut DependentVariables,
    dnf: &Dnf,
    course: &CourseId,
    kind: RequisiteKind,
    diagnostic: bool,
    unknowns: &mut Vec<Variable>,
) -> Variable {
    if dnf.is_empty() {
        return pinned(builder, true);
    }
    let mut clause_vars = Vec::new();
    for clause in dnf.clauses() {
        let mut atom_vars = Vec::new();
        for atom in clause {
            let v = match classify_atom(atom) {
                Atom::Course(other) => match kind {
                    RequisiteKind::Pre => dv.taken_before(builder, &other, course),
                    RequisiteKind::Co if diagnostic => {
                        dv.taken_before_or_concurrently_feasibility(builder, &other, course)
                    }
                    RequisiteKind::Co => dv.taken_before_or_concurrently_planning(builder, &other, course),
                    RequisiteKind::Post => dv.taken_after(builder, &other, course),
                },
                Atom::Standing(level) => dv.standing_met(builder, level, course),
                Atom::CreditHours(n) => dv.credits_prereq_met(builder, n, course),
                Atom::Unknown(_) => {
                    let unk = builder.new_bool();
                    unknowns.push(unk);
                    unk
                }
            };
            atom_vars.push(v);
        }
        clause_vars.push(and_reif(builder, &atom_vars));
    }
    or_reif(builder, &clause_vars)
}

fn push_requisite_assumption(
    builder: &mut ModelBuilder,
    taken_c: Variable,
    satisfied: Variable,
    course: &CourseId,
    kind: RequisiteKind,
    out: &mut Vec<PrereqAssumption>,
) {
    let diff: Expression = Expression::from(taken_c) - Expression::from(satisfied);
    let ok = builder.new_bool();
    implies_le(builder, ok, diff, 0.0, 1.0);
    out.push(PrereqAssumption {
        course: course.clone(),
        kind: kind.label(),
        var: ok,
    });
}

fn filter_matches_static(filter: &Filter, course: &crate::types::Course) -> bool {
    if let Some(names) = &filter.course_names {
        if !names.contains(&course.code) {
            return false;
        }
    }
    if let Some(programs) = &filter.programs {
        if !programs.contains(&course.program) {
            return false;
        }
    }
    if let Some(levels) = &filter.year_levels {
        if !levels.contains(&course.year_level) {
            return false;
        }
    }
    true
}

fn apply_user_overrides(
    builder: &mut ModelBuilder,
    catalog: &CourseCatalog,
    request: &PlanRequest,
    grid: &HashMap<CourseId, Vec<Variable>>,
    taken: &HashMap<CourseId, Variable>,
) {
    for c in &request.completed_courses {
        if let Some(&v) = taken.get(c) {
            builder.add_constraint(constraint!(v == 1));
        }
    }
    for c in &request.must_take {
        if let Some(&v) = taken.get(c) {
            builder.add_constraint(constraint!(v == 1));
        }
    }
    for c in &request.must_not_take {
        if let Some(&v) = taken.get(c) {
            builder.add_constraint(constraint!(v == 0));
        }
    }
    for (course, semester) in &request.taken_in {
        if !catalog.contains(course) || *semester < 1 || *semester > request.total_semesters {
            continue;
        }
        if let Some(row) = grid.get(course) {
            builder.add_constraint(constraint!(row[(*semester - 1) as usize] == 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Course;

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
    fn skeleton_builds_one_row_and_column_per_course_and_semester() {
        let catalog = CourseCatalog::new(vec![course("csci1060u"), course("csci2050u")]);
        let program_map = ProgramMap::default();
        let request = PlanRequest {
            total_semesters: 4,
            ..Default::default()
        };
        let mut builder = ModelBuilder::new();
        let model = build_skeleton(&mut builder, &catalog, &program_map, &request, 5, 10, false);
        assert_eq!(model.grid.len(), 2);
        assert_eq!(model.grid[&CourseId::from("csci1060u")].len(), 4);
        assert_eq!(model.row_sum_assumptions.len(), 2);
        assert_eq!(model.semester_limit_assumptions.len(), 4);
    }
}
