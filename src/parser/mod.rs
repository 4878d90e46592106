mod catalog_json;
mod program_map_json;
mod sections_json;
mod validation;

pub use catalog_json::*;
pub use program_map_json::*;
pub use sections_json::*;
pub use validation::*;

use crate::error::{PlannerError, Result};
use std::fs;
use std::path::Path;

/// Generic JSON fixture loader shared by `catalog_json`, `program_map_json`, and
/// `sections_json` -- the one place a missing file or malformed JSON turns into a
/// `PlannerError`.
pub(crate) fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| PlannerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| PlannerError::JsonParse {
        file: path_str,
        message: e.to_string(),
    })
}
