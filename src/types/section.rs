use super::{CourseId, SectionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        };
        write!(f, "{name}")
    }
}

/// A single weekly meeting window, encoded as 24-hour clock minutes (0-2359, i.e.
/// `hhmm` as an integer, matching the source catalog's encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub day: Weekday,
    pub begin_time: u32,
    pub end_time: u32,
}

impl MeetingTime {
    pub fn overlaps(&self, other: &MeetingTime) -> bool {
        self.day == other.day && self.begin_time < other.end_time && other.begin_time < self.end_time
    }
}

/// Section type, distinguishing a lecture from its linked lab/tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    Lecture,
    Lab,
    Tutorial,
}

/// A single offered section of a course for a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub course_code: CourseId,
    pub section_type: SectionType,
    pub subject: String,
    pub year_level: u8,
    #[serde(default)]
    pub meeting_times: Vec<MeetingTime>,
    /// Each inner list is an AND-group of sections that must all be taken together
    /// if this section is; the outer list is an OR over such groups (e.g. lab
    /// section L01 *or* L02, each paired with its own tutorial).
    #[serde(default)]
    pub linked_sections: Vec<Vec<SectionId>>,
}

/// An always-present busy window on the weekly timeline (e.g. a job, a commute).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForcedConflict {
    pub day: Weekday,
    pub start: u32,
    pub stop: u32,
}

/// A user-supplied count constraint over `Lecture` sections selected by a filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableFilterConstraint {
    #[serde(default)]
    pub course_codes: Option<Vec<CourseId>>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub year_levels: Option<Vec<u8>>,
    #[serde(default)]
    pub lte: Option<u32>,
    #[serde(default)]
    pub gte: Option<u32>,
    #[serde(default)]
    pub eq: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationTarget {
    CoursesTaken,
    DaysOnCampus,
    TimeOnCampus,
}

/// A request to the Timetable Solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableRequest {
    #[serde(default)]
    pub forced_conflicts: Vec<ForcedConflict>,
    #[serde(default)]
    pub filter_constraints: Vec<TimetableFilterConstraint>,
    pub optimization_target: Option<OptimizationTarget>,
}

/// A single weekly schedule: the set of sections taken, keyed by weekday for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub sections_taken: Vec<SectionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_times_on_different_days_never_overlap() {
        let a = MeetingTime {
            day: Weekday::Monday,
            begin_time: 900,
            end_time: 1000,
        };
        let b = MeetingTime {
            day: Weekday::Tuesday,
            begin_time: 900,
            end_time: 1000,
        };
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn overlapping_windows_on_same_day_detected() {
        let a = MeetingTime {
            day: Weekday::Monday,
            begin_time: 900,
            end_time: 1000,
        };
        let b = MeetingTime {
            day: Weekday::Monday,
            begin_time: 930,
            end_time: 1030,
        };
        assert!(a.overlaps(&b));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let a = MeetingTime {
            day: Weekday::Monday,
            begin_time: 900,
            end_time: 1000,
        };
        let b = MeetingTime {
            day: Weekday::Monday,
            begin_time: 1000,
            end_time: 1100,
        };
        assert!(!a.overlaps(&b));
    }
}
