use serde::{Deserialize, Serialize};

/// Tunable parameters for every solver in the crate, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget for the graduation planner, in seconds.
    #[serde(default = "default_plan_time_limit")]
    pub plan_time_limit_secs: f64,

    /// Wall-clock budget for the feasibility/diagnosis solver, in seconds.
    #[serde(default = "default_diagnose_time_limit")]
    pub diagnose_time_limit_secs: f64,

    /// Wall-clock budget for a single timetable solve, in seconds.
    #[serde(default = "default_timetable_time_limit")]
    pub timetable_time_limit_secs: f64,

    /// Relative optimality gap the backend is allowed to stop at.
    #[serde(default = "default_opt_tol")]
    pub optimality_gap: f64,

    /// Max courses a student may take in a single semester, unless a program map overrides it.
    #[serde(default = "default_semester_course_limit")]
    pub default_semester_course_limit: u32,

    /// Scale factor applied to credit-hour quantities so the MILP model stays integral.
    #[serde(default = "default_credit_hour_scale")]
    pub credit_hour_scale: i32,

    /// Maximum distinct timetables returned by `--all` enumeration.
    #[serde(default = "default_max_timetables")]
    pub max_timetables: usize,
}

fn default_plan_time_limit() -> f64 {
    5.0
}

fn default_diagnose_time_limit() -> f64 {
    60.0
}

fn default_timetable_time_limit() -> f64 {
    5.0
}

fn default_opt_tol() -> f64 {
    0.01
}

fn default_semester_course_limit() -> u32 {
    5
}

fn default_credit_hour_scale() -> i32 {
    10
}

fn default_max_timetables() -> usize {
    10
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            plan_time_limit_secs: default_plan_time_limit(),
            diagnose_time_limit_secs: default_diagnose_time_limit(),
            timetable_time_limit_secs: default_timetable_time_limit(),
            optimality_gap: default_opt_tol(),
            default_semester_course_limit: default_semester_course_limit(),
            credit_hour_scale: default_credit_hour_scale(),
            max_timetables: default_max_timetables(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.plan_time_limit_secs, 5.0);
        assert_eq!(cfg.diagnose_time_limit_secs, 60.0);
        assert_eq!(cfg.credit_hour_scale, 10);
    }

    #[test]
    fn deserializes_partial_toml_with_defaults() {
        let cfg: SolverConfig = toml::from_str("plan_time_limit_secs = 10.0").unwrap();
        assert_eq!(cfg.plan_time_limit_secs, 10.0);
        assert_eq!(cfg.default_semester_course_limit, 5);
    }
}
