//! Degree Planner - constraint-based undergraduate graduation planning.
//!
//! This library solves three related problems over a program's course catalog and
//! requirements map, each as its own mixed-integer linear program run through
//! `good_lp`/HiGHS:
//!
//! 1. **Graduation Requirements Solver** ([`solver::requirements`]): given a student's
//!    completed courses and a horizon of semesters, find a course-by-semester plan
//!    that satisfies every required-course, one-of, prerequisite, and credit-hour-quota
//!    rule in the program map.
//! 2. **Feasibility / Diagnosis Solver** ([`solver::feasibility`]): the same model with
//!    every rule made soft, used to explain *why* no plan exists when the planner comes
//!    back empty-handed.
//! 3. **Timetable Solver** ([`solver::timetable`]): given a set of course sections for a
//!    term, choose a non-overlapping weekly schedule, optionally enumerating several
//!    distinct options.
//!
//! # Example
//!
//! ```no_run
//! use degree_planner::config::SolverConfig;
//! use degree_planner::parser::{load_catalog_from_file, load_program_map};
//! use degree_planner::solver::{plan, PlanOutcome};
//! use degree_planner::types::PlanRequest;
//! use std::path::Path;
//!
//! let catalog = load_catalog_from_file(Path::new("./demos/cs/catalog.json")).unwrap();
//! let program_map = load_program_map(Path::new("./demos/cs/program_maps.json"), "computer-science").unwrap();
//! let request = PlanRequest {
//!     total_semesters: 8,
//!     ..Default::default()
//! };
//! let config = SolverConfig::default();
//!
//! match plan(&catalog, &program_map, &request, &config).unwrap() {
//!     PlanOutcome::Plan(p) => println!("planned {} courses", p.courses_taken().count()),
//!     PlanOutcome::Infeasible(v) => println!("{} violation(s)", v.len()),
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod depvars;
pub mod dnf;
pub mod error;
pub mod model;
pub mod parser;
pub mod reporter;
pub mod solver;
pub mod types;

pub use error::{PlannerError, Result};
