//! Dependent-Variable Library: memoized constructors for derived predicates over a
//! `taken`/`taken_in` variable skeleton that some solver has already built. A cache
//! miss constructs the variable and side-effectfully adds its defining constraints
//! to the shared `ModelBuilder`; a hit returns the existing variable. Caches are
//! owned by this struct, which is in turn owned by a single solve -- they never
//! outlive the model whose variables they reference.

use crate::catalog::CourseCatalog;
use crate::model::{and_reif, iff_ge_const, implies_ge, implies_le, pinned, ModelBuilder};
use crate::types::{CourseId, Standing};
use good_lp::{Expression, Variable};
use std::collections::{BTreeSet, HashMap};

pub struct DependentVariables<'a> {
    catalog: &'a CourseCatalog,
    taken: &'a HashMap<CourseId, Variable>,
    taken_in: &'a HashMap<CourseId, Variable>,
    total_semesters: u32,
    credit_scale: i32,

    all_taken_cache: HashMap<BTreeSet<CourseId>, Variable>,
    taken_before_cache: HashMap<(CourseId, CourseId), Variable>,
    taken_before_or_concurrently_planning_cache: HashMap<(CourseId, CourseId), Variable>,
    taken_before_or_concurrently_feasibility_cache: HashMap<(CourseId, CourseId), Variable>,
    taken_after_cache: HashMap<(CourseId, CourseId), Variable>,
    standing_met_cache: HashMap<(Standing, CourseId), Variable>,
    credits_by_semester_cache: HashMap<u32, Variable>,
    credits_prereq_met_cache: HashMap<(u32, CourseId), Variable>,
}

impl<'a> DependentVariables<'a> {
    pub fn new(
        catalog: &'a CourseCatalog,
        taken: &'a HashMap<CourseId, Variable>,
        taken_in: &'a HashMap<CourseId, Variable>,
        total_semesters: u32,
        credit_scale: i32,
    ) -> Self {
        Self {
            catalog,
            taken,
            taken_in,
            total_semesters,
            credit_scale,
            all_taken_cache: HashMap::new(),
            taken_before_cache: HashMap::new(),
            taken_before_or_concurrently_planning_cache: HashMap::new(),
            taken_before_or_concurrently_feasibility_cache: HashMap::new(),
            taken_after_cache: HashMap::new(),
            standing_met_cache: HashMap::new(),
            credits_by_semester_cache: HashMap::new(),
            credits_prereq_met_cache: HashMap::new(),
        }
    }

    /// The "not taken" sentinel, `total_semesters + 1`.
    fn unknown_semester(&self) -> i64 {
        self.total_semesters as i64 + 1
    }

    /// A loose upper bound for big-M indicator encodings over `taken_in` differences;
    /// the domain is `1..=total_semesters+1` so any gap is bounded by this.
    fn semester_big_m(&self) -> f64 {
        (self.total_semesters as f64) + 2.0
    }

    /// A loose upper bound on `credits_by_semester`'s scaled value -- every course in
    /// the catalog taken, at an assumed 10 credit hours apiece. Used both as the
    /// variable's own domain bound and as the big-M for any indicator comparing it
    /// against a constant threshold (the big-M must dominate the variable's own range,
    /// not the semester span -- a small big-M here silently forces `meets = 0` once
    /// accumulated credits exceed the threshold by more than the big-M).
    fn credits_upper_bound(&self) -> f64 {
        (self.catalog.len() as f64 * 10.0 * self.credit_scale as f64).ceil()
    }

    fn taken_witness(&self, builder: &mut ModelBuilder, c: &CourseId) -> Variable {
        if !self.catalog.contains(c) {
            return pinned(builder, false);
        }
        *self
            .taken
            .get(c)
            .unwrap_or_else(|| panic!("taken[{c}] missing for catalog course"))
    }

    /// `AllTrue(vars)`.
    pub fn all_true(&self, builder: &mut ModelBuilder, vars: &[Variable]) -> Variable {
        and_reif(builder, vars)
    }

    /// `AllTaken(set)`, memoized by the (order-independent) course set.
    pub fn all_taken(&mut self, builder: &mut ModelBuilder, courses: &[CourseId]) -> Variable {
        let key: BTreeSet<CourseId> = courses.iter().cloned().collect();
        if let Some(&v) = self.all_taken_cache.get(&key) {
            return v;
        }
        let witnesses: Vec<Variable> = courses.iter().map(|c| self.taken_witness(builder, c)).collect();
        let v = and_reif(builder, &witnesses);
        self.all_taken_cache.insert(key, v);
        v
    }

    /// `TakenBefore(a,b)`: `v -> AllTaken({a,b}) ∧ taken_in(a) < taken_in(b)`.
    /// One-directional by design -- `v = 0` leaves the relation unconstrained, which is
    /// exactly what a prerequisite clause needs (the solver may simply not pick this
    /// witness to satisfy the clause some other way).
    pub fn taken_before(&mut self, builder: &mut ModelBuilder, a: &CourseId, b: &CourseId) -> Variable {
        let key = (a.clone(), b.clone());
        if let Some(&v) = self.taken_before_cache.get(&key) {
            return v;
        }
        let v = self.ordering_witness(builder, a, b, Order::Strict);
        self.taken_before_cache.insert(key, v);
        v
    }

    /// `TakenBeforeOrConcurrently(a,b)`, planning variant: the ordering half is gated
    /// on `taken[b]` alone (see DESIGN.md for why the two variants diverge) --
    /// appropriate when the plan is being *constructed* and `b` not yet being
    /// scheduled should not itself make the witness false, only unusable.
    pub fn taken_before_or_concurrently_planning(
        &mut self,
        builder: &mut ModelBuilder,
        a: &CourseId,
        b: &CourseId,
    ) -> Variable {
        let key = (a.clone(), b.clone());
        if let Some(&v) = self.taken_before_or_concurrently_planning_cache.get(&key) {
            return v;
        }
        let v = self.ordering_witness(builder, a, b, Order::NonStrict);
        self.taken_before_or_concurrently_planning_cache.insert(key, v);
        v
    }

    /// `TakenBeforeOrConcurrently(a,b)`, feasibility variant: the ordering half is
    /// additionally gated on `taken[a] ∧ taken[b]` both holding, so a diagnosis run
    /// never falsifies this witness purely because one side of an already-violated
    /// co-requisite wasn't scheduled -- the dedicated co-requisite violation category
    /// carries that signal instead.
    pub fn taken_before_or_concurrently_feasibility(
        &mut self,
        builder: &mut ModelBuilder,
        a: &CourseId,
        b: &CourseId,
    ) -> Variable {
        let key = (a.clone(), b.clone());
        if let Some(&v) = self.taken_before_or_concurrently_feasibility_cache.get(&key) {
            return v;
        }
        let a_witness = self.taken_witness(builder, a);
        let b_witness = self.taken_witness(builder, b);
        let both = and_reif(builder, &[a_witness, b_witness]);
        let order = self.ordering_witness(builder, a, b, Order::NonStrict);
        let v = and_reif(builder, &[both, order]);
        self.taken_before_or_concurrently_feasibility_cache.insert(key, v);
        v
    }

    /// `TakenAfter(a,b)`: `v -> AllTaken({a,b}) ∧ taken_in(a) > taken_in(b)`.
    pub fn taken_after(&mut self, builder: &mut ModelBuilder, a: &CourseId, b: &CourseId) -> Variable {
        let key = (a.clone(), b.clone());
        if let Some(&v) = self.taken_after_cache.get(&key) {
            return v;
        }
        let v = self.ordering_witness(builder, a, b, Order::Reverse);
        self.taken_after_cache.insert(key, v);
        v
    }

    fn ordering_witness(&mut self, builder: &mut ModelBuilder, a: &CourseId, b: &CourseId, order: Order) -> Variable {
        let all_taken = self.all_taken(builder, &[a.clone(), b.clone()]);
        if !self.catalog.contains(a) || !self.catalog.contains(b) {
            let v = builder.new_bool();
            builder.add_constraint(good_lp::constraint!(v <= all_taken));
            return v;
        }
        let ti_a = *self.taken_in.get(a).expect("taken_in missing for catalog course");
        let ti_b = *self.taken_in.get(b).expect("taken_in missing for catalog course");
        let v = builder.new_bool();
        builder.add_constraint(good_lp::constraint!(v <= all_taken));
        let big_m = self.semester_big_m();
        let diff: Expression = Expression::from(ti_a) - Expression::from(ti_b);
        match order {
            Order::Strict => implies_le(builder, v, diff, -1.0, big_m),
            Order::NonStrict => implies_le(builder, v, diff, 0.0, big_m),
            Order::Reverse => implies_ge(builder, v, diff, 1.0, big_m),
        }
        v
    }

    /// `StandingMet(level,c)`: `v ↔ taken_in(c) >= threshold(level)`.
    pub fn standing_met(&mut self, builder: &mut ModelBuilder, level: Standing, c: &CourseId) -> Variable {
        let key = (level, c.clone());
        if let Some(&v) = self.standing_met_cache.get(&key) {
            return v;
        }
        let v = if !self.catalog.contains(c) {
            pinned(builder, false)
        } else {
            let ti = *self.taken_in.get(c).expect("taken_in missing for catalog course");
            let v = builder.new_bool();
            iff_ge_const(builder, v, Expression::from(ti), level.threshold() as f64, self.semester_big_m());
            v
        };
        self.standing_met_cache.insert(key, v);
        v
    }

    /// `CreditsBySemester(s)`: scaled credit-hour sum over courses taken strictly
    /// before `s`. Semester 1 is always 0 by definition.
    pub fn credits_by_semester(&mut self, builder: &mut ModelBuilder, s: u32) -> Variable {
        if let Some(&v) = self.credits_by_semester_cache.get(&s) {
            return v;
        }
        let v = if s <= 1 {
            pinned_int(builder, 0)
        } else {
            let scale = self.credit_scale as f64;
            let big_m = self.semester_big_m();
            let codes: Vec<CourseId> = self.catalog.codes().cloned().collect();
            let mut terms: Vec<Expression> = Vec::new();
            for c in &codes {
                let ti = *self.taken_in.get(c).expect("taken_in missing for catalog course");
                let ind = builder.new_bool();
                // ind <-> taken_in(c) <= s - 1, i.e. taken_in(c) < s
                crate::model::iff_le_const(builder, ind, Expression::from(ti), (s - 1) as f64, big_m);
                let credit_hours = self.catalog.get(c).unwrap().credit_hours;
                terms.push(Expression::from(ind) * (credit_hours * scale));
            }
            let sum: Expression = terms.into_iter().sum();
            let upper_bound = self.credits_upper_bound() as i64;
            let cbs = builder.new_int(0, upper_bound.max(1));
            builder.add_constraint(good_lp::constraint!(Expression::from(cbs) == sum));
            cbs
        };
        self.credits_by_semester_cache.insert(s, v);
        v
    }

    /// `CreditsPrereqMet(n,c)`: true iff some semester `s` has `c` taken at `s` and
    /// `CreditsBySemester(s) >= n * credit_scale`.
    pub fn credits_prereq_met(&mut self, builder: &mut ModelBuilder, n: u32, c: &CourseId) -> Variable {
        let key = (n, c.clone());
        if let Some(&v) = self.credits_prereq_met_cache.get(&key) {
            return v;
        }
        let v = if !self.catalog.contains(c) {
            pinned(builder, false)
        } else {
            let ti = *self.taken_in.get(c).expect("taken_in missing for catalog course");
            let big_m = self.semester_big_m();
            let credits_big_m = self.credits_upper_bound();
            let mut per_semester = Vec::new();
            for s in 1..=self.total_semesters {
                let eq_s = crate::model::iff_eq_const(builder, Expression::from(ti), s as f64, big_m);
                let cbs = self.credits_by_semester(builder, s);
                let threshold = (n * self.credit_scale as u32) as f64;
                let meets = builder.new_bool();
                iff_ge_const(builder, meets, Expression::from(cbs), threshold, credits_big_m);
                let and_v = and_reif(builder, &[eq_s, meets]);
                per_semester.push(and_v);
            }
            crate::model::or_reif(builder, &per_semester)
        };
        self.credits_prereq_met_cache.insert(key, v);
        v
    }
}

#[derive(Clone, Copy)]
enum Order {
    Strict,
    NonStrict,
    Reverse,
}

fn pinned_int(builder: &mut ModelBuilder, value: i64) -> Variable {
    let v = builder.new_int(value, value);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dnf;
    use good_lp::{Solution, SolverModel};

    fn course(code: &str) -> crate::types::Course {
        crate::types::Course {
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

    fn setup(catalog: &CourseCatalog, builder: &mut ModelBuilder, total_semesters: u32) -> (HashMap<CourseId, Variable>, HashMap<CourseId, Variable>) {
        let mut taken = HashMap::new();
        let mut taken_in = HashMap::new();
        for c in catalog.codes() {
            taken.insert(c.clone(), builder.new_bool());
            taken_in.insert(c.clone(), builder.new_int(1, total_semesters as i64 + 1));
        }
        (taken, taken_in)
    }

    #[test]
    fn taken_before_is_false_when_course_absent_from_catalog() {
        let catalog = CourseCatalog::new(vec![course("csci3070u")]);
        let mut builder = ModelBuilder::new();
        let (taken, taken_in) = setup(&catalog, &mut builder, 8);
        let mut dv = DependentVariables::new(&catalog, &taken, &taken_in, 8, 10);

        let v = dv.taken_before(&mut builder, &CourseId::from("ghost0000u"), &CourseId::from("csci3070u"));
        let (vars, constraints) = builder.into_parts();
        let mut problem = vars.maximise(Expression::from(v)).using(good_lp::solvers::highs::highs);
        for c in constraints {
            problem.add_constraint(c);
        }
        let solution = problem.solve().unwrap();
        assert!(solution.value(v) < 0.5);
    }

    #[test]
    fn memoization_returns_same_variable() {
        let catalog = CourseCatalog::new(vec![course("csci3070u"), course("csci2050u")]);
        let mut builder = ModelBuilder::new();
        let (taken, taken_in) = setup(&catalog, &mut builder, 8);
        let mut dv = DependentVariables::new(&catalog, &taken, &taken_in, 8, 10);

        let a = CourseId::from("csci2050u");
        let b = CourseId::from("csci3070u");
        let v1 = dv.taken_before(&mut builder, &a, &b);
        let v2 = dv.taken_before(&mut builder, &a, &b);
        assert_eq!(v1, v2);
    }

    /// A large catalog pushes `credits_by_semester`'s upper bound well past
    /// `semester_big_m()`; the big-M guarding `meets` in `credits_prereq_met` must
    /// scale with that bound, not with the semester span, or it wrongly forces
    /// `meets = 0` once accumulated credits clear the threshold by more than a few
    /// semesters' worth of credit hours.
    #[test]
    fn credits_prereq_met_holds_well_past_the_semester_span_big_m() {
        let courses: Vec<_> = (0..40).map(|i| course(&format!("csci{:04}u", 1000 + i))).collect();
        let target = CourseId::from("csci1039u");
        let catalog = CourseCatalog::new(courses);
        let total_semesters = 8;
        let credit_scale = 10;

        let mut builder = ModelBuilder::new();
        let (taken, taken_in) = setup(&catalog, &mut builder, total_semesters);
        for &v in taken.values() {
            builder.add_constraint(good_lp::constraint!(Expression::from(v) == 1));
        }
        for (c, &ti) in &taken_in {
            let sem = if *c == target { 2 } else { 1 };
            builder.add_constraint(good_lp::constraint!(Expression::from(ti) == sem as f64));
        }

        let mut dv = DependentVariables::new(&catalog, &taken, &taken_in, total_semesters, credit_scale);
        // 39 courses at 3 credit hours each, taken before semester 2, is 1170 scaled
        // credit hours -- comfortably past a 90-credit-hour (900 scaled) threshold.
        let v = dv.credits_prereq_met(&mut builder, 90, &target);

        let (vars, constraints) = builder.into_parts();
        let mut problem = vars.maximise(Expression::from(v)).using(good_lp::solvers::highs::highs);
        for c in constraints {
            problem.add_constraint(c);
        }
        let solution = problem.solve().unwrap();
        assert!(solution.value(v) > 0.5, "90 credit-hour prerequisite should be met by 1050 accumulated credit hours");
    }
}
