//! Field Validator — completeness gate evaluated before any layout runs.
//!
//! Pure predicate over a `FormState` snapshot: no side effects, no mutation.
//! Rules are evaluated in a fixed order and short-circuit on the first
//! failure so the user sees one actionable message at a time.

use thiserror::Error;

use crate::models::form::{FormState, Student};

/// A validator rule failure, naming the field group that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill all school details")]
    SchoolDetails,

    #[error("please fill all fields for Student 1 (School Copy)")]
    Student1Fields,

    #[error("please fill all fields for Student 2 (Student Copy)")]
    Student2Fields,

    #[error("enter at least one subject with a date")]
    NoValidSubjects,

    #[error("subject row {index} must have both a name and a date")]
    PartialSubjectRow { index: usize },
}

/// Checks the whole form for completeness.
///
/// Rule order (short-circuiting):
/// 1. school name, academic year, examination type non-empty after trim
/// 2. every field of student 1 non-empty after trim
/// 3. every field of student 2 non-empty after trim
/// 4. at least one subject row with both name and date
/// 5. no subject row with exactly one of name/date populated
pub fn validate(state: &FormState) -> Result<(), ValidationError> {
    if state.school_name.trim().is_empty()
        || state.academic_year.trim().is_empty()
        || state.examination_type.trim().is_empty()
    {
        return Err(ValidationError::SchoolDetails);
    }

    if !student_complete(&state.student1) {
        return Err(ValidationError::Student1Fields);
    }
    if !student_complete(&state.student2) {
        return Err(ValidationError::Student2Fields);
    }

    if state.valid_subjects().is_empty() {
        return Err(ValidationError::NoValidSubjects);
    }

    if let Some(index) = state.subjects.iter().position(|s| s.is_partial()) {
        return Err(ValidationError::PartialSubjectRow { index });
    }

    Ok(())
}

fn student_complete(student: &Student) -> bool {
    !student.name.trim().is_empty()
        && !student.class_name.trim().is_empty()
        && !student.father_name.trim().is_empty()
        && !student.hall_ticket_number.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
