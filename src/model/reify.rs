//! Reification primitives: `good_lp` gives us variables and plain linear inequalities
//! but no native `OnlyEnforceIf`, optional intervals, or domain-tying helpers. Every
//! "v implies constraint" and "v iff constraint" used by the dependent-variable library
//! and the three solvers is built here as an explicit indicator encoding against a
//! known bound on the constrained expression -- `good_lp` has no symbolic big-M helper,
//! so the bound is always threaded in by the caller, who knows the variable's domain.

use good_lp::{constraint, Expression, Variable};

use super::ModelBuilder;

/// `v = AND(vars)`. `v <= x_i` for every term; `v >= sum(vars) - (n-1)` closes the gap.
/// An empty `vars` list means "vacuously true" -- `v` is pinned to 1.
pub fn and_reif(builder: &mut ModelBuilder, vars: &[Variable]) -> Variable {
    let v = builder.new_bool();
    if vars.is_empty() {
        builder.add_constraint(constraint!(v == 1));
        return v;
    }
    for &x in vars {
        builder.add_constraint(constraint!(v <= x));
    }
    let sum: Expression = vars.iter().map(|&x| Expression::from(x)).sum();
    let n = vars.len() as f64;
    builder.add_constraint(constraint!(v >= sum - (n - 1.0)));
    v
}

/// `v = OR(vars)`. An empty `vars` list means "vacuously false" -- `v` is pinned to 0.
pub fn or_reif(builder: &mut ModelBuilder, vars: &[Variable]) -> Variable {
    let v = builder.new_bool();
    if vars.is_empty() {
        builder.add_constraint(constraint!(v == 0));
        return v;
    }
    for &x in vars {
        builder.add_constraint(constraint!(v >= x));
    }
    let sum: Expression = vars.iter().map(|&x| Expression::from(x)).sum();
    builder.add_constraint(constraint!(v <= sum));
    v
}

/// A fresh boolean pinned to a constant, for the "absent from the catalog" witness.
pub fn pinned(builder: &mut ModelBuilder, value: bool) -> Variable {
    let v = builder.new_bool();
    let rhs = if value { 1.0 } else { 0.0 };
    builder.add_constraint(constraint!(v == rhs));
    v
}

pub fn exactly_one(builder: &mut ModelBuilder, vars: &[Variable]) {
    let sum: Expression = vars.iter().map(|&x| Expression::from(x)).sum();
    builder.add_constraint(constraint!(sum == 1));
}

pub fn at_most_one(builder: &mut ModelBuilder, vars: &[Variable]) {
    let sum: Expression = vars.iter().map(|&x| Expression::from(x)).sum();
    builder.add_constraint(constraint!(sum <= 1));
}

pub fn at_least_one(builder: &mut ModelBuilder, vars: &[Variable]) {
    let sum: Expression = vars.iter().map(|&x| Expression::from(x)).sum();
    builder.add_constraint(constraint!(sum >= 1));
}

/// `v -> (lhs <= rhs)`, i.e. `lhs <= rhs + big_m * (1 - v)`. `big_m` must dominate the
/// largest value `lhs - rhs` can take when `v = 0`.
pub fn implies_le(builder: &mut ModelBuilder, v: Variable, lhs: Expression, rhs: f64, big_m: f64) {
    builder.add_constraint(constraint!(lhs <= rhs + big_m * (1.0 - v)));
}

/// `v -> (lhs >= rhs)`, i.e. `lhs >= rhs - big_m * (1 - v)`.
pub fn implies_ge(builder: &mut ModelBuilder, v: Variable, lhs: Expression, rhs: f64, big_m: f64) {
    builder.add_constraint(constraint!(lhs >= rhs - big_m * (1.0 - v)));
}

/// `v -> (lhs == rhs)` for an exact equality, via both directions.
pub fn implies_eq(builder: &mut ModelBuilder, v: Variable, lhs: Expression, rhs: f64, big_m: f64) {
    implies_le(builder, v, lhs.clone(), rhs, big_m);
    implies_ge(builder, v, lhs, rhs, big_m);
}

/// `v <-> (lhs >= rhs)` against a constant threshold, for integer-valued `lhs`: the
/// false branch falls back on the next integer below `rhs` (`lhs <= rhs - 1` when
/// `v = 0`), so this must only be used where `lhs` and `rhs` are both integral.
/// Used for standing thresholds and credit-hour quota checks, never for comparing two
/// course's `taken_in` against each other (those only need one-directional
/// [`implies_le`]/[`implies_ge`] -- see `depvars::taken_before` and friends).
pub fn iff_ge_const(builder: &mut ModelBuilder, v: Variable, lhs: Expression, rhs: f64, big_m: f64) {
    implies_ge(builder, v, lhs.clone(), rhs, big_m);
    builder.add_constraint(constraint!(lhs <= (rhs - 1.0) + big_m * v));
}

/// `v <-> (lhs <= rhs)` against a constant threshold, the mirror of [`iff_ge_const`].
pub fn iff_le_const(builder: &mut ModelBuilder, v: Variable, lhs: Expression, rhs: f64, big_m: f64) {
    implies_le(builder, v, lhs.clone(), rhs, big_m);
    builder.add_constraint(constraint!(lhs >= (rhs + 1.0) - big_m * v));
}

/// `v <-> (lhs == rhs)` against a constant, built as `AND(lhs <= rhs, lhs >= rhs)`.
pub fn iff_eq_const(builder: &mut ModelBuilder, lhs: Expression, rhs: f64, big_m: f64) -> Variable {
    let le = builder.new_bool();
    iff_le_const(builder, le, lhs.clone(), rhs, big_m);
    let ge = builder.new_bool();
    iff_ge_const(builder, ge, lhs, rhs, big_m);
    and_reif(builder, &[le, ge])
}

/// Max-equality over booleans is exactly OR.
pub fn max_eq_bool(builder: &mut ModelBuilder, vars: &[Variable]) -> Variable {
    or_reif(builder, vars)
}

/// Ties an integer `value` to a one-hot row `bits` (assumed `sum(bits) <= 1`
/// elsewhere): `value = offset + i` when `bits[i] = 1`, or `none_value` when no bit is
/// set. This is the "map domain" primitive behind `taken_in`.
pub fn map_domain(builder: &mut ModelBuilder, bits: &[Variable], value: Variable, offset: i64, none_value: i64) {
    let weighted: Expression = bits
        .iter()
        .enumerate()
        .map(|(i, &b)| Expression::from(b) * (offset + i as i64) as f64)
        .sum();
    let any: Expression = bits.iter().map(|&b| Expression::from(b)).sum();
    builder.add_constraint(constraint!(
        value == weighted + (none_value as f64) * (1.0 - any)
    ));
}
