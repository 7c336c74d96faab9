//! Form-state data model — the single aggregate the whole service works on.
//!
//! One `FormState` exists per session, owned by `AppState` behind a lock.
//! Students are only overwritten through the update handlers, never replaced
//! wholesale; the subject sequence keeps insertion order and never shrinks
//! below one row.

use serde::{Deserialize, Serialize};

/// Fixed prefix concatenated with the hall-ticket number on the rendered
/// ticket. Display formatting only — the stored number stays bare.
pub const HALL_TICKET_PREFIX: &str = "KMEMS2025";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub class_name: String,
    pub father_name: String,
    pub hall_ticket_number: String,
}

/// One row of the exam schedule. `date` is an ISO `YYYY-MM-DD` string as
/// produced by a date input, or empty while the row is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub date: String,
}

impl Subject {
    /// A row counts toward the schedule table only when both fields are
    /// non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.date.trim().is_empty()
    }

    /// Both fields empty — the row is ignored, not an error.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.date.trim().is_empty()
    }

    /// Exactly one of name/date populated — a form defect the validator
    /// rejects rather than filtering silently.
    pub fn is_partial(&self) -> bool {
        !self.is_valid() && !self.is_blank()
    }
}

/// Aggregate root for one generation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub school_name: String,
    pub academic_year: String,
    pub examination_type: String,
    pub student1: Student,
    pub student2: Student,
    pub subjects: Vec<Subject>,
}

impl Default for FormState {
    /// Seeded session defaults matching the blank form the school starts from.
    fn default() -> Self {
        FormState {
            school_name: "KIRAN MODERN E/M SCHOOL".to_string(),
            academic_year: "2025-26".to_string(),
            examination_type: "FA-1".to_string(),
            student1: Student::default(),
            student2: Student::default(),
            subjects: vec![
                subject("Telugu", "2025-08-12"),
                subject("Hindi", "2025-08-12"),
                subject("English", "2025-08-13"),
                subject("Maths", "2025-08-13"),
                subject("EVS", "2025-08-14"),
            ],
        }
    }
}

fn subject(name: &str, date: &str) -> Subject {
    Subject {
        name: name.to_string(),
        date: date.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Subject sequence operations
// ────────────────────────────────────────────────────────────────────────────

impl FormState {
    /// Subjects that count toward the schedule table, in insertion order.
    pub fn valid_subjects(&self) -> Vec<&Subject> {
        self.subjects.iter().filter(|s| s.is_valid()).collect()
    }

    /// Appends an empty schedule row for the user to fill in.
    pub fn add_subject(&mut self) {
        self.subjects.push(Subject::default());
    }

    /// Removes the row at `index`. Removing the last remaining row is a
    /// no-op — the table must always have at least one entry. Returns whether
    /// a row was actually removed.
    pub fn remove_subject(&mut self, index: usize) -> bool {
        if self.subjects.len() <= 1 || index >= self.subjects.len() {
            return false;
        }
        self.subjects.remove(index);
        true
    }

    /// Edits the row at `index` in place. `None` fields are left untouched.
    /// Returns false when the index is out of range.
    pub fn update_subject(&mut self, index: usize, name: Option<String>, date: Option<String>) -> bool {
        let Some(row) = self.subjects.get_mut(index) else {
            return false;
        };
        if let Some(name) = name {
            row.name = name;
        }
        if let Some(date) = date {
            row.date = date;
        }
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_seeds_five_subjects() {
        let state = FormState::default();
        assert_eq!(state.subjects.len(), 5);
        assert_eq!(state.subjects[0].name, "Telugu");
        assert_eq!(state.subjects[4].date, "2025-08-14");
        assert_eq!(state.school_name, "KIRAN MODERN E/M SCHOOL");
    }

    #[test]
    fn test_subject_validity_classification() {
        assert!(subject("Maths", "2025-08-13").is_valid());
        assert!(subject("", "").is_blank());
        assert!(subject("Maths", "").is_partial());
        assert!(subject("", "2025-08-13").is_partial());
        // Whitespace-only counts as empty
        assert!(subject("  ", " ").is_blank());
    }

    #[test]
    fn test_remove_last_subject_is_noop() {
        let mut state = FormState::default();
        state.subjects = vec![subject("Telugu", "2025-08-12")];
        assert!(!state.remove_subject(0));
        assert_eq!(state.subjects.len(), 1);
    }

    #[test]
    fn test_remove_subject_by_position() {
        let mut state = FormState::default();
        assert!(state.remove_subject(1)); // Hindi
        assert_eq!(state.subjects.len(), 4);
        assert_eq!(state.subjects[1].name, "English");
    }

    #[test]
    fn test_remove_subject_out_of_range() {
        let mut state = FormState::default();
        assert!(!state.remove_subject(99));
        assert_eq!(state.subjects.len(), 5);
    }

    #[test]
    fn test_update_subject_partial_fields() {
        let mut state = FormState::default();
        assert!(state.update_subject(0, Some("Science".to_string()), None));
        assert_eq!(state.subjects[0].name, "Science");
        assert_eq!(state.subjects[0].date, "2025-08-12", "date should be untouched");
    }

    #[test]
    fn test_valid_subjects_preserves_order() {
        let mut state = FormState::default();
        state.subjects.insert(2, Subject::default()); // blank row in the middle
        let names: Vec<&str> = state.valid_subjects().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Telugu", "Hindi", "English", "Maths", "EVS"]);
    }
}
