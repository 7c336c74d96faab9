//! Form-editing endpoints.
//!
//! These are the only mutation paths into `FormState`. Updates are partial:
//! omitted fields keep their current value, so a client can patch one input
//! at a time without re-sending the whole form. No validation happens here —
//! drafts are allowed to be incomplete, and the validator only runs at the
//! preview/generate boundary.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SchoolUpdate {
    pub school_name: Option<String>,
    pub academic_year: Option<String>,
    pub examination_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub father_name: Option<String>,
    pub hall_ticket_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormState> {
    Json(state.form.read().await.clone())
}

/// PUT /api/v1/form/school
pub async fn handle_update_school(
    State(state): State<AppState>,
    Json(req): Json<SchoolUpdate>,
) -> Json<FormState> {
    let mut form = state.form.write().await;
    if let Some(v) = req.school_name {
        form.school_name = v;
    }
    if let Some(v) = req.academic_year {
        form.academic_year = v;
    }
    if let Some(v) = req.examination_type {
        form.examination_type = v;
    }
    Json(form.clone())
}

/// PUT /api/v1/form/students/:which
///
/// `which` is `student1` or `student2` — anything else is a 404.
pub async fn handle_update_student(
    State(state): State<AppState>,
    Path(which): Path<String>,
    Json(req): Json<StudentUpdate>,
) -> Result<Json<FormState>, AppError> {
    let mut form = state.form.write().await;
    let student = match which.as_str() {
        "student1" => &mut form.student1,
        "student2" => &mut form.student2,
        other => {
            return Err(AppError::NotFound(format!(
                "Unknown student slot: {other}"
            )))
        }
    };
    if let Some(v) = req.name {
        student.name = v;
    }
    if let Some(v) = req.class_name {
        student.class_name = v;
    }
    if let Some(v) = req.father_name {
        student.father_name = v;
    }
    if let Some(v) = req.hall_ticket_number {
        student.hall_ticket_number = v;
    }
    Ok(Json(form.clone()))
}

/// POST /api/v1/form/subjects — appends an empty schedule row.
pub async fn handle_add_subject(State(state): State<AppState>) -> Json<FormState> {
    let mut form = state.form.write().await;
    form.add_subject();
    Json(form.clone())
}

/// PUT /api/v1/form/subjects/:index
pub async fn handle_update_subject(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<SubjectUpdate>,
) -> Result<Json<FormState>, AppError> {
    let mut form = state.form.write().await;
    if !form.update_subject(index, req.name, req.date) {
        return Err(AppError::NotFound(format!(
            "No subject row at index {index}"
        )));
    }
    Ok(Json(form.clone()))
}

/// DELETE /api/v1/form/subjects/:index
///
/// Removing the last remaining row is a silent no-op — the table keeps at
/// least one entry. An out-of-range index is also a no-op; both return the
/// current state.
pub async fn handle_remove_subject(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> (StatusCode, Json<FormState>) {
    let mut form = state.form.write().await;
    form.remove_subject(index);
    (StatusCode::OK, Json(form.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
