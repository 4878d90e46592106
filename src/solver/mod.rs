//! The three solvers this crate exists to run, plus the skeleton they share.
//!
//! [`requirements`] and [`feasibility`] are two views of the same variable model
//! (see [`skeleton`]): the planner pins every rule and optimizes a course plan, the
//! diagnoser frees every rule and reports which ones had to give. [`timetable`] is
//! independent -- it schedules sections for a term, not courses across a degree.

pub mod feasibility;
pub mod requirements;
pub mod skeleton;
pub mod timetable;

pub use feasibility::diagnose;
pub use requirements::{plan, plan_to_request, PlanOutcome};
pub use timetable::{enumerate_timetables, solve_timetable};
