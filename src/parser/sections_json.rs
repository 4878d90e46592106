//! Section-offering loader for the Timetable Solver, the term-catalog analogue of
//! `catalog_json`.

use super::load_json_file;
use crate::error::Result;
use crate::types::Section;
use std::path::Path;

pub fn load_sections_from_file(path: &Path) -> Result<Vec<Section>> {
    load_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_sections_with_meeting_times() {
        let dir = std::env::temp_dir().join("school-scheduler-sections-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sections.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "10234",
                "course_code": "csci3070u",
                "section_type": "Lecture",
                "subject": "csci",
                "year_level": 3,
                "meeting_times": [{"day": "Monday", "begin_time": 900, "end_time": 1000}]
            }]"#,
        )
        .unwrap();

        let sections = load_sections_from_file(&path).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].meeting_times.len(), 1);
    }
}
