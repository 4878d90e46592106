//! Course Model Store loading: the catalog is an external collaborator's output
//! (CSV/catalog parser producing DNF expressions is explicitly out of scope) --
//! this module only deserializes the already-tokenized JSON fixture it hands us.

use super::load_json_file;
use crate::catalog::CourseCatalog;
use crate::error::{PlannerError, Result};
use crate::types::Course;
use std::path::Path;

/// Load the full course catalog from a single JSON array fixture.
pub fn load_catalog_from_file(path: &Path) -> Result<CourseCatalog> {
    let courses: Vec<Course> = load_json_file(path)?;
    Ok(CourseCatalog::new(courses))
}
