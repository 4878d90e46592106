//! ProgramMap loading. A single fixture holds every degree this process knows about,
//! keyed by the same `course_map` name a `PlanRequest` names (e.g. `"computer-science"`),
//! following the crate's one-struct-per-file JSON loader idiom.

use super::load_json_file;
use crate::error::{PlannerError, Result};
use crate::types::ProgramMap;
use std::collections::HashMap;
use std::path::Path;

/// Load every bundled program map from one JSON object, `{ name: ProgramMap, ... }`.
pub fn load_program_maps_from_file(path: &Path) -> Result<HashMap<String, ProgramMap>> {
    load_json_file(path)
}

/// Load a single named program map, erroring if it isn't present in the fixture.
pub fn load_program_map(path: &Path, name: &str) -> Result<ProgramMap> {
    let maps = load_program_maps_from_file(path)?;
    maps.get(name).cloned().ok_or_else(|| {
        PlannerError::JsonParse {
            file: path.display().to_string(),
            message: format!("no program map named '{name}'"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_named_program_map() {
        let dir = std::env::temp_dir().join("school-scheduler-program-map-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("program_maps.json");
        std::fs::write(
            &path,
            r#"{
                "computer-science": {
                    "required_courses": ["csci1060u"],
                    "one_of": [["math1850u", "math2050u"]],
                    "filter_constraints": []
                }
            }"#,
        )
        .unwrap();

        let map = load_program_map(&path, "computer-science").unwrap();
        assert_eq!(map.required_courses.len(), 1);
        assert_eq!(map.one_of.len(), 1);
    }

    #[test]
    fn unknown_program_name_errors() {
        let dir = std::env::temp_dir().join("school-scheduler-program-map-test2");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("program_maps.json");
        std::fs::write(&path, r#"{"computer-science": {"required_courses": []}}"#).unwrap();

        let err = load_program_map(&path, "mathematics").unwrap_err();
        assert!(matches!(err, PlannerError::JsonParse { .. }));
    }
}
