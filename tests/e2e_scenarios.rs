//! End-to-end seed scenarios against a small in-memory catalog, covering the
//! concrete cases this crate's planner, diagnoser, and timetable solver need to
//! get right together rather than module-by-module.

use degree_planner::config::SolverConfig;
use degree_planner::solver::{diagnose, plan, plan_to_request, solve_timetable, PlanOutcome};
use degree_planner::types::{
    Course, CourseId, CourseType, Dnf, Filter, FilterConstraint, MeetingTime, PlanRequest, ProgramMap, Section,
    SectionId, SectionType, TimetableFilterConstraint, TimetableRequest, ViolationCategory, Weekday,
};

/// An unrestricted filter constraint matching every course -- the timetable objective
/// always minimizes the number of courses taken, so without a forcing `gte`/`eq` filter
/// the empty schedule is optimal. Scenarios that expect sections to actually be picked
/// need one.
fn want_at_least(n: u32) -> TimetableRequest {
    TimetableRequest {
        filter_constraints: vec![TimetableFilterConstraint {
            gte: Some(n),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn course(code: &str, year_level: u8, credit_hours: f64, pre: &[&[&str]]) -> Course {
    Course {
        code: CourseId::from(code),
        program: "computer-science".to_string(),
        year_level,
        credit_hours,
        pre_requisites: Dnf(pre.iter().map(|c| c.iter().map(|s| s.to_string()).collect()).collect()),
        co_requisites: Dnf::default(),
        post_requisites: Dnf::default(),
        credit_restrictions: Vec::new(),
    }
}

fn sample_catalog() -> Vec<Course> {
    vec![
        course("csci1060u", 1, 3.0, &[]),
        course("csci1061u", 1, 3.0, &[&["csci1060u"]]),
        course("math1850u", 1, 3.0, &[]),
        course("csci2050u", 2, 3.0, &[&["csci1061u"]]),
        course("csci2110u", 2, 3.0, &[&["csci2050u"]]),
        course("math2050u", 2, 3.0, &[&["math1850u"]]),
        course("stat2010u", 2, 3.0, &[&["math1850u"]]),
        course("csci3070u", 3, 3.0, &[&["csci2050u"]]),
        course("csci3020u", 3, 3.0, &[&["csci2050u"]]),
        course("csci4160u", 4, 3.0, &[&["csci3070u"], &["third_year_standing"]]),
    ]
}

fn sample_program_map() -> ProgramMap {
    ProgramMap {
        required_courses: vec![
            CourseId::from("csci1060u"),
            CourseId::from("csci1061u"),
            CourseId::from("csci2050u"),
            CourseId::from("math1850u"),
        ],
        one_of: vec![vec![CourseId::from("stat2010u"), CourseId::from("math2050u")]],
        filter_constraints: vec![FilterConstraint {
            name: "Science Electives".to_string(),
            filter: Filter {
                course_type: CourseType::All,
                ..Default::default()
            },
            lte: None,
            gte: Some(27),
        }],
    }
}

#[test]
fn happy_path_plans_every_required_course_as_core_and_fills_one_of() {
    let catalog = degree_planner::catalog::CourseCatalog::new(sample_catalog());
    let program_map = sample_program_map();
    let request = PlanRequest {
        total_semesters: 8,
        ..Default::default()
    };
    let config = SolverConfig::default();

    match plan(&catalog, &program_map, &request, &config).unwrap() {
        PlanOutcome::Plan(p) => {
            for required in &program_map.required_courses {
                assert!(
                    p.courses_taken().any(|c| c == required),
                    "{required} must be in the plan"
                );
            }
            let one_of_taken = program_map.one_of[0].iter().filter(|c| p.courses_taken().any(|t| t == *c)).count();
            assert_eq!(one_of_taken, 1, "exactly one of the one-of group must be core");
        }
        PlanOutcome::Infeasible(v) => panic!("expected a feasible plan, got {v:?}"),
    }
}

#[test]
fn forcing_an_upper_elective_pulls_in_its_transitive_prerequisite_chain() {
    let catalog = degree_planner::catalog::CourseCatalog::new(sample_catalog());
    let program_map = ProgramMap::default();
    let request = PlanRequest {
        must_take: vec![CourseId::from("csci4160u")],
        total_semesters: 8,
        ..Default::default()
    };
    let config = SolverConfig::default();

    match plan(&catalog, &program_map, &request, &config).unwrap() {
        PlanOutcome::Plan(p) => {
            let taken: Vec<_> = p.courses_taken().collect();
            assert!(taken.contains(&&CourseId::from("csci3070u")), "direct prerequisite missing");
            assert!(taken.contains(&&CourseId::from("csci2050u")), "transitive prerequisite missing");
            assert!(taken.contains(&&CourseId::from("csci1061u")), "transitive prerequisite missing");
            let chain_order = [
                p.semester_of(&CourseId::from("csci1061u")).unwrap().0,
                p.semester_of(&CourseId::from("csci2050u")).unwrap().0,
                p.semester_of(&CourseId::from("csci3070u")).unwrap().0,
                p.semester_of(&CourseId::from("csci4160u")).unwrap().0,
            ];
            assert!(chain_order.windows(2).all(|w| w[0] < w[1]), "chain must be strictly increasing: {chain_order:?}");
        }
        PlanOutcome::Infeasible(v) => panic!("expected a feasible plan, got {v:?}"),
    }
}

#[test]
fn repeated_taken_in_is_reported_without_invoking_the_solver() {
    let catalog = degree_planner::catalog::CourseCatalog::new(sample_catalog());
    let program_map = ProgramMap::default();
    let request = PlanRequest {
        taken_in: vec![(CourseId::from("csci3070u"), 5), (CourseId::from("csci3070u"), 6)],
        total_semesters: 8,
        ..Default::default()
    };
    let config = SolverConfig::default();

    match plan(&catalog, &program_map, &request, &config).unwrap() {
        PlanOutcome::Infeasible(v) => {
            assert_eq!(v.len(), 1);
            assert_eq!(v[0].category, ViolationCategory::CourseRepeated);
            assert_eq!(v[0].current, Some(2));
            assert_eq!(v[0].contributing_courses, vec![CourseId::from("csci3070u")]);
        }
        PlanOutcome::Plan(_) => panic!("repeated taken_in must short-circuit before solving"),
    }
}

#[test]
fn infeasible_elective_quota_is_diagnosed_with_current_below_threshold() {
    let catalog = degree_planner::catalog::CourseCatalog::new(sample_catalog());
    let program_map = sample_program_map();
    let request = PlanRequest {
        completed_courses: vec![
            CourseId::from("csci1060u"),
            CourseId::from("csci1061u"),
            CourseId::from("math1850u"),
        ],
        must_not_take: vec![
            CourseId::from("csci2050u"),
            CourseId::from("csci2110u"),
            CourseId::from("math2050u"),
            CourseId::from("stat2010u"),
            CourseId::from("csci3070u"),
        ],
        total_semesters: 8,
        ..Default::default()
    };
    let config = SolverConfig::default();

    let violations = match plan(&catalog, &program_map, &request, &config).unwrap() {
        PlanOutcome::Infeasible(v) => v,
        PlanOutcome::Plan(p) => {
            // Even if the planner manages a plan, the diagnoser run directly must
            // still surface the quota shortfall deterministically.
            drop(p);
            diagnose(&catalog, &program_map, &request, &config).unwrap()
        }
    };

    let quota = violations
        .iter()
        .find(|v| v.category == ViolationCategory::FilterQuota("Science Electives".to_string()));
    assert!(quota.is_some(), "expected a Science Electives quota violation, got {violations:?}");
    let quota = quota.unwrap();
    assert_eq!(quota.gte, Some(27));
    assert!(quota.current.unwrap() < 27, "current credit total should fall short of the quota");
    assert!(!quota.contributing_courses.is_empty());
}

#[test]
fn a_solved_plan_forced_back_in_produces_zero_violations() {
    let catalog = degree_planner::catalog::CourseCatalog::new(sample_catalog());
    let program_map = sample_program_map();
    let request = PlanRequest {
        total_semesters: 8,
        ..Default::default()
    };
    let config = SolverConfig::default();

    let plan_result = match plan(&catalog, &program_map, &request, &config).unwrap() {
        PlanOutcome::Plan(p) => p,
        PlanOutcome::Infeasible(v) => panic!("expected a feasible plan, got {v:?}"),
    };

    let verify_request = plan_to_request(&plan_result, request.total_semesters);
    let violations = diagnose(&catalog, &program_map, &verify_request, &config).unwrap();
    assert!(violations.is_empty(), "forcing a solved plan back in must not raise violations: {violations:?}");
}

fn lecture(id: &str, course: &str, day: Weekday, begin: u32, end: u32, linked: Vec<Vec<&str>>) -> Section {
    Section {
        id: SectionId(id.to_string()),
        course_code: CourseId::from(course),
        section_type: SectionType::Lecture,
        subject: course[..4].to_string(),
        year_level: 1,
        meeting_times: vec![MeetingTime { day, begin_time: begin, end_time: end }],
        linked_sections: linked
            .into_iter()
            .map(|g| g.into_iter().map(|s| SectionId(s.to_string())).collect())
            .collect(),
    }
}

fn lab(id: &str, course: &str, day: Weekday, begin: u32, end: u32) -> Section {
    Section {
        id: SectionId(id.to_string()),
        course_code: CourseId::from(course),
        section_type: SectionType::Lab,
        subject: course[..4].to_string(),
        year_level: 1,
        meeting_times: vec![MeetingTime { day, begin_time: begin, end_time: end }],
        linked_sections: Vec::new(),
    }
}

#[test]
fn overlapping_lectures_yield_at_most_one_section() {
    let sections = vec![
        lecture("l1", "csci1060u", Weekday::Monday, 900, 1000, Vec::new()),
        lecture("l2", "math1850u", Weekday::Monday, 930, 1030, Vec::new()),
    ];
    let request = want_at_least(1);
    let config = SolverConfig::default();

    let schedule = solve_timetable(&sections, &request, &config).unwrap().unwrap();
    assert_eq!(schedule.sections_taken.len(), 1);
}

#[test]
fn linked_lab_and_tutorial_group_is_pulled_in_whole() {
    let tutorial = Section {
        id: SectionId("t01".to_string()),
        course_code: CourseId::from("csci1060u"),
        section_type: SectionType::Tutorial,
        subject: "csci".to_string(),
        year_level: 1,
        meeting_times: vec![MeetingTime { day: Weekday::Friday, begin_time: 1300, end_time: 1400 }],
        linked_sections: Vec::new(),
    };
    let sections = vec![
        lecture(
            "l1",
            "csci1060u",
            Weekday::Monday,
            900,
            1000,
            vec![vec!["lab01", "lab02"], vec!["t01"]],
        ),
        lab("lab01", "csci1060u", Weekday::Tuesday, 900, 1100),
        lab("lab02", "csci1060u", Weekday::Wednesday, 900, 1100),
        tutorial,
    ];
    let request = want_at_least(1);
    let config = SolverConfig::default();

    let schedule = solve_timetable(&sections, &request, &config).unwrap().unwrap();
    assert!(schedule.sections_taken.contains(&SectionId("l1".to_string())));
    let lab_taken = schedule.sections_taken.contains(&SectionId("lab01".to_string()))
        || schedule.sections_taken.contains(&SectionId("lab02".to_string()));
    assert!(lab_taken, "one full lab group must be selected alongside the lecture");
    assert!(schedule.sections_taken.contains(&SectionId("t01".to_string())), "the tutorial group must be selected too");
}
