//! Timetable Solver: chooses one section per desired course (and its linked lab/tutorial
//! group, if any) so that nothing overlaps on the weekly clock. `good_lp`/HiGHS has
//! no native interval variables, so meeting-time windows are encoded as plain affine
//! expressions in terms of each section's `taken` boolean; see the day-metric helpers
//! below for how min/max-of-day is recovered without a generic min/max-equality
//! primitive. Multi-solution enumeration has no solver-native callback either; it is
//! an explicit frontier search over growing "excluded course" sets, driven entirely
//! from the outside.

use crate::config::SolverConfig;
use crate::error::Result;
use crate::model::{and_reif, or_reif, ModelBuilder};
use crate::types::{
    CourseId, OptimizationTarget, Section, SectionId, SectionType, TimetableFilterConstraint, TimetableRequest,
    Weekday, WeeklySchedule,
};
use good_lp::{constraint, Expression, Solution};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Sentinel clock value (minutes-as-hhmm) used to push an untaken section's
/// meeting window out of range of the real day, so it never wins a min/max.
const DAY_START_SENTINEL: f64 = 2359.0;

struct TimetableModel {
    taken: HashMap<SectionId, good_lp::Variable>,
    course_was_taken: HashMap<CourseId, good_lp::Variable>,
    has_class_on: HashMap<Weekday, good_lp::Variable>,
    time_on_campus: HashMap<Weekday, good_lp::Variable>,
}

fn lecture_sections(sections: &[Section]) -> impl Iterator<Item = &Section> {
    sections.iter().filter(|s| s.section_type == SectionType::Lecture)
}

/// Derives the subject whitelist a filter constraint implies, for pre-culling. Empty
/// means "no restriction" -- deliberately does *not* cull every section in that case,
/// since a request with no subject-scoped filters should not forbid everything.
fn valid_subjects(sections: &[Section], filters: &[TimetableFilterConstraint]) -> HashSet<String> {
    let mut out = HashSet::new();
    for f in filters {
        if let Some(subjects) = &f.subjects {
            out.extend(subjects.iter().cloned());
        }
        if let Some(codes) = &f.course_codes {
            for code in codes {
                if let Some(s) = sections.iter().find(|s| &s.course_code == code) {
                    out.insert(s.subject.clone());
                }
            }
        }
    }
    out
}

fn filter_matches(section: &Section, f: &TimetableFilterConstraint) -> bool {
    if let Some(codes) = &f.course_codes {
        if !codes.contains(&section.course_code) {
            return false;
        }
    }
    if let Some(subjects) = &f.subjects {
        if !subjects.contains(&section.subject) {
            return false;
        }
    }
    if let Some(levels) = &f.year_levels {
        if !levels.contains(&section.year_level) {
            return false;
        }
    }
    true
}

fn build_model(
    builder: &mut ModelBuilder,
    sections: &[Section],
    request: &TimetableRequest,
    excluded_courses: &BTreeSet<CourseId>,
) -> TimetableModel {
    let mut taken: HashMap<SectionId, good_lp::Variable> = HashMap::new();
    for s in sections {
        taken.insert(s.id.clone(), builder.new_bool());
    }

    let whitelist = valid_subjects(sections, &request.filter_constraints);
    for s in sections {
        if !whitelist.is_empty() && !whitelist.contains(&s.subject) {
            builder.add_constraint(constraint!(Expression::from(taken[&s.id]) == 0));
        }
        if excluded_courses.contains(&s.course_code) {
            builder.add_constraint(constraint!(Expression::from(taken[&s.id]) == 0));
        }
    }

    // At most one section per (course, section type) -- e.g. one lecture, one lab.
    let mut by_course_type: HashMap<(CourseId, SectionType), Vec<SectionId>> = HashMap::new();
    for s in sections {
        by_course_type
            .entry((s.course_code.clone(), s.section_type))
            .or_default()
            .push(s.id.clone());
    }
    for group in by_course_type.values() {
        let sum: Expression = group.iter().map(|id| Expression::from(taken[id])).sum();
        builder.add_constraint(constraint!(sum <= 1));
    }

    // A chosen lecture must pull in one of its linked groups (e.g. lab+tutorial pair).
    for s in sections {
        if s.linked_sections.is_empty() {
            continue;
        }
        let group_oks: Vec<_> = s
            .linked_sections
            .iter()
            .map(|group| {
                let vars: Vec<_> = group.iter().filter_map(|id| taken.get(id).copied()).collect();
                and_reif(builder, &vars)
            })
            .collect();
        let linked_ok = or_reif(builder, &group_oks);
        builder.add_constraint(constraint!(Expression::from(taken[&s.id]) <= Expression::from(linked_ok)));
    }

    // Pairwise no-overlap, per weekday, including the user's always-present busy windows.
    for &day in &Weekday::ALL {
        let day_sections: Vec<&Section> = sections
            .iter()
            .filter(|s| s.meeting_times.iter().any(|mt| mt.day == day))
            .collect();
        for i in 0..day_sections.len() {
            for j in (i + 1)..day_sections.len() {
                let a = day_sections[i];
                let b = day_sections[j];
                if a.id == b.id {
                    continue;
                }
                let overlaps = a
                    .meeting_times
                    .iter()
                    .filter(|mt| mt.day == day)
                    .any(|ma| b.meeting_times.iter().filter(|mt| mt.day == day).any(|mb| ma.overlaps(mb)));
                if overlaps {
                    builder.add_constraint(constraint!(
                        Expression::from(taken[&a.id]) + Expression::from(taken[&b.id]) <= 1
                    ));
                }
            }
        }
        for conflict in &request.forced_conflicts {
            if conflict.day != day {
                continue;
            }
            for s in &day_sections {
                let conflicts = s
                    .meeting_times
                    .iter()
                    .filter(|mt| mt.day == day)
                    .any(|mt| mt.begin_time < conflict.stop && conflict.start < mt.end_time);
                if conflicts {
                    builder.add_constraint(constraint!(Expression::from(taken[&s.id]) == 0));
                }
            }
        }
    }

    let mut course_was_taken: HashMap<CourseId, good_lp::Variable> = HashMap::new();
    let mut by_course: HashMap<CourseId, Vec<SectionId>> = HashMap::new();
    for s in lecture_sections(sections) {
        by_course.entry(s.course_code.clone()).or_default().push(s.id.clone());
    }
    for (course, ids) in &by_course {
        let vars: Vec<_> = ids.iter().map(|id| taken[id]).collect();
        course_was_taken.insert(course.clone(), or_reif(builder, &vars));
    }

    for fc in &request.filter_constraints {
        let matched: Vec<&CourseId> = by_course
            .keys()
            .filter(|course| {
                lecture_sections(sections)
                    .find(|s| &s.course_code == *course)
                    .map(|s| filter_matches(s, fc))
                    .unwrap_or(false)
            })
            .collect();
        let sum: Expression = matched.iter().map(|c| Expression::from(course_was_taken[*c])).sum();
        if let Some(eq) = fc.eq {
            builder.add_constraint(constraint!(sum.clone() == eq as f64));
        }
        if let Some(lte) = fc.lte {
            builder.add_constraint(constraint!(sum.clone() <= lte as f64));
        }
        if let Some(gte) = fc.gte {
            builder.add_constraint(constraint!(sum >= gte as f64));
        }
    }

    // Day metrics, only meaningful for the day-aware optimization targets, but cheap
    // enough to always build so the decoded `WeeklySchedule` can report them uniformly.
    let mut has_class_on = HashMap::new();
    let mut time_on_campus = HashMap::new();
    for &day in &Weekday::ALL {
        let day_sections: Vec<&Section> = sections
            .iter()
            .filter(|s| s.meeting_times.iter().any(|mt| mt.day == day))
            .collect();
        let day_vars: Vec<_> = day_sections.iter().map(|s| taken[&s.id]).collect();
        let has_class = or_reif(builder, &day_vars);

        let day_start = builder.new_int(0, DAY_START_SENTINEL as i64);
        let day_end = builder.new_int(0, DAY_START_SENTINEL as i64);
        for s in &day_sections {
            for mt in s.meeting_times.iter().filter(|mt| mt.day == day) {
                let v = taken[&s.id];
                // day_start <= begin_time when taken, else <= the sentinel (vacuous).
                let stv = Expression::from(mt.begin_time as f64)
                    + (DAY_START_SENTINEL - mt.begin_time as f64) * (Expression::from(1.0) - Expression::from(v));
                builder.add_constraint(constraint!(Expression::from(day_start) <= stv));
                // day_end >= end_time when taken, else >= 0 (vacuous).
                let etv = Expression::from(mt.end_time as f64) * Expression::from(v);
                builder.add_constraint(constraint!(Expression::from(day_end) >= etv));
            }
        }

        let toc = builder.new_int(0, DAY_START_SENTINEL as i64);
        let span = Expression::from(day_end) - Expression::from(day_start);
        let not_has_class = Expression::from(1.0) - Expression::from(has_class);
        // toc == span when has_class, else toc == 0.
        builder.add_constraint(constraint!(
            Expression::from(toc) <= span.clone() + DAY_START_SENTINEL * not_has_class.clone()
        ));
        builder.add_constraint(constraint!(
            Expression::from(toc) >= span - DAY_START_SENTINEL * not_has_class.clone()
        ));
        builder.add_constraint(constraint!(
            Expression::from(toc) <= DAY_START_SENTINEL * (Expression::from(1.0) - not_has_class)
        ));

        has_class_on.insert(day, has_class);
        time_on_campus.insert(day, toc);
    }

    TimetableModel {
        taken,
        course_was_taken,
        has_class_on,
        time_on_campus,
    }
}

fn decode(sections: &[Section], model: &TimetableModel, solution: &impl Solution) -> WeeklySchedule {
    let mut sections_taken: Vec<SectionId> = sections
        .iter()
        .filter(|s| solution.value(model.taken[&s.id]) > 0.5)
        .map(|s| s.id.clone())
        .collect();
    sections_taken.sort();
    WeeklySchedule { sections_taken }
}

fn courses_of(sections: &[Section], schedule: &WeeklySchedule) -> BTreeSet<CourseId> {
    schedule
        .sections_taken
        .iter()
        .filter_map(|id| sections.iter().find(|s| &s.id == id))
        .map(|s| s.course_code.clone())
        .collect()
}

/// A single solve against the given exclusion set. `None` means no feasible
/// arrangement exists once those courses are forbidden.
fn solve_once(
    sections: &[Section],
    request: &TimetableRequest,
    config: &SolverConfig,
    excluded_courses: &BTreeSet<CourseId>,
) -> Result<Option<WeeklySchedule>> {
    let mut builder = ModelBuilder::new();
    let model = build_model(&mut builder, sections, request, excluded_courses);

    let course_count: Expression = model.course_was_taken.values().map(|&v| Expression::from(v)).sum();
    let big = (sections.len() as f64 + 10.0) * 1_000.0;

    let secondary: Expression = match request.optimization_target {
        Some(OptimizationTarget::CoursesTaken) | None => Expression::from(0.0),
        Some(OptimizationTarget::DaysOnCampus) => {
            Expression::from(0.0) - model.has_class_on.values().map(|&v| Expression::from(v)).sum::<Expression>()
        }
        Some(OptimizationTarget::TimeOnCampus) => {
            Expression::from(0.0) - model.time_on_campus.values().map(|&v| Expression::from(v)).sum::<Expression>()
        }
    };

    let objective = Expression::from(0.0) - course_count * big + secondary;
    let solution = builder.solve_maximize(objective, config.timetable_time_limit_secs, config.optimality_gap)?;

    Ok(solution.map(|sol| decode(sections, &model, &sol)))
}

/// The single best timetable for `request` against the given section pool.
pub fn solve_timetable(
    sections: &[Section],
    request: &TimetableRequest,
    config: &SolverConfig,
) -> Result<Option<WeeklySchedule>> {
    solve_once(sections, request, config, &BTreeSet::new())
}

/// Up to `config.max_timetables` distinct timetables, found by repeatedly excluding one
/// course from an already-found solution and re-solving, driven entirely from outside
/// the solver rather than through a native enumeration callback. Deduplicates by the
/// solution's course set: two section choices for the same courses do not count as
/// distinct results here.
pub fn enumerate_timetables(
    sections: &[Section],
    request: &TimetableRequest,
    config: &SolverConfig,
) -> Result<Vec<WeeklySchedule>> {
    let max = config.max_timetables;
    let mut found: Vec<WeeklySchedule> = Vec::new();
    let mut seen_signatures: HashSet<BTreeSet<CourseId>> = HashSet::new();
    let mut frontier: Vec<BTreeSet<CourseId>> = vec![BTreeSet::new()];
    let mut visited_exclusions: HashSet<BTreeSet<CourseId>> = HashSet::new();
    let max_attempts = (max as usize) * 20 + 1;
    let mut attempts = 0usize;

    while let Some(excluded) = frontier.pop() {
        if found.len() >= max as usize || attempts >= max_attempts {
            break;
        }
        attempts += 1;
        if !visited_exclusions.insert(excluded.clone()) {
            continue;
        }
        let Some(schedule) = solve_once(sections, request, config, &excluded)? else {
            continue;
        };
        let signature = courses_of(sections, &schedule);
        if seen_signatures.insert(signature.clone()) {
            for course in &signature {
                let mut next = excluded.clone();
                next.insert(course.clone());
                frontier.push(next);
            }
            found.push(schedule);
        }
    }

    Ok(found)
}
