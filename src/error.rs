use thiserror::Error;

/// Domain-specific errors for the degree planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse TOML config '{file}': {message}")]
    TomlParse { file: String, message: String },

    #[error("Course '{0}' referenced but absent from the catalog")]
    UnknownCourse(String),

    #[error("MILP solver failed: {0}")]
    SolverFailed(String),

    #[error("No feasible solution found within the time limit")]
    Infeasible,

    #[error("Solver timed out after {seconds}s without a feasible solution")]
    SolverTimeout { seconds: u64 },

    #[error("Internal invariant broken: {0}")]
    InvariantViolation(String),
}

/// Internal result alias. Violations are data, not errors -- only genuine failures
/// (backend crash, invariant break, I/O) flow through this type. `main` wraps the
/// top-level dispatch in `anyhow::Result` at the CLI boundary.
pub type Result<T> = std::result::Result<T, PlannerError>;
