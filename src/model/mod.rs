//! Boolean/Integer Model Primitives: a thin facade over the MILP backend.
//!
//! `good_lp` (backed by `highs`) gives us variables, linear expressions, and plain
//! inequalities, but none of CP-SAT's native reification (`OnlyEnforceIf`), optional
//! intervals, or domain/equality helpers. This module supplies that missing layer so
//! the rest of the crate can talk about "reified equalities" and "map-domain" the way
//! the source model does, without hand-rolling big-M encodings at every call site.

mod reify;

pub use reify::*;

use crate::error::{PlannerError, Result};
use good_lp::{
    variable, Constraint as LpConstraint, Expression, ProblemVariables, Solution, SolverModel,
    Variable,
};

/// Accumulates decision variables and constraints for a single solve. Dropped with
/// the solve that owns it -- nothing here outlives one model build.
pub struct ModelBuilder {
    vars: ProblemVariables,
    constraints: Vec<LpConstraint>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            vars: ProblemVariables::new(),
            constraints: Vec::new(),
        }
    }

    pub fn new_bool(&mut self) -> Variable {
        self.vars.add(variable().binary())
    }

    pub fn new_int(&mut self, lb: i64, ub: i64) -> Variable {
        self.vars.add(variable().integer().min(lb as f64).max(ub as f64))
    }

    pub fn add_constraint(&mut self, c: LpConstraint) {
        self.constraints.push(c);
    }

    pub fn extend_constraints(&mut self, cs: impl IntoIterator<Item = LpConstraint>) {
        self.constraints.extend(cs);
    }

    /// Consume the builder, handing back the raw pieces a `SolverModel` needs.
    pub fn into_parts(self) -> (ProblemVariables, Vec<LpConstraint>) {
        (self.vars, self.constraints)
    }

    /// Consume the builder and run it through the HiGHS backend, maximising
    /// `objective` subject to the accumulated constraints and the config's wall-clock
    /// and optimality-gap budget. Returns the found assignment, or `None` if the
    /// backend proved infeasibility or gave up without any feasible point.
    pub fn solve_maximize(
        self,
        objective: Expression,
        time_limit_secs: f64,
        optimality_gap: f64,
    ) -> Result<Option<impl Solution>> {
        let (vars, constraints) = self.into_parts();
        let mut problem = vars
            .maximise(objective)
            .using(good_lp::solvers::highs::highs)
            .set_option("time_limit", time_limit_secs)
            .set_option("mip_rel_gap", optimality_gap)
            .set_option("threads", 1)
            .set_option("output_flag", false);
        for c in constraints {
            problem.add_constraint(c);
        }
        match problem.solve() {
            Ok(solution) => Ok(Some(solution)),
            Err(good_lp::ResolutionError::Infeasible) => Ok(None),
            Err(good_lp::ResolutionError::Unbounded) => {
                Err(PlannerError::SolverFailed("model unbounded".to_string()))
            }
            Err(e) => Err(PlannerError::SolverFailed(e.to_string())),
        }
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
