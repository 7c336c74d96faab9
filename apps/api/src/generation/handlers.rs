//! Generation endpoints — the controller in front of the layout engine.
//!
//! Both handlers run the same pipeline prefix (snapshot → validate →
//! compose), which is what guarantees the preview and the printed page can
//! never disagree on content. Only the print path claims the generation
//! gate; the preview is read-only and free to run any time.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::form::validation::validate;
use crate::layout::composer::compose;
use crate::models::form::FormState;
use crate::render::preview::{build_preview, PreviewDocument};
use crate::render::svg::render_svg;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub filename: String,
    pub path: String,
    pub status: String,
}

/// Filename convention for the written document.
pub fn document_filename(state: &FormState) -> String {
    let name = state.student1.name.trim();
    let name = if name.is_empty() { "Student" } else { name };
    format!("Hall_Tickets_{name}.svg")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tickets/preview
///
/// Validates the current form and returns the flow-layout preview tree.
/// Same composition as the print path — identical content and row counts.
pub async fn handle_preview(
    State(state): State<AppState>,
) -> Result<Json<PreviewDocument>, AppError> {
    let form = state.form.read().await.clone();
    validate(&form)?;

    let doc = compose(&form, &state.page_config);
    Ok(Json(build_preview(&doc)))
}

/// POST /api/v1/tickets/generate
///
/// Validates, claims the generation gate, composes both panels, renders the
/// printable page, and writes it atomically through the sink. A sink failure
/// clears the gate to `Failed` and leaves no partial file.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let form = state.form.read().await.clone();
    // Rejected forms never touch the gate; the form state is left unchanged.
    validate(&form)?;

    if !state.gate.try_begin() {
        return Err(AppError::GenerationInProgress);
    }

    match run_generation(&form, &state).await {
        Ok(response) => {
            state.gate.complete();
            Ok(Json(response))
        }
        Err(err) => {
            state.gate.fail(err.to_string());
            Err(err)
        }
    }
}

/// Layout and rendering are synchronous and run to completion; the sink
/// write is the only await.
async fn run_generation(form: &FormState, state: &AppState) -> Result<GenerateResponse, AppError> {
    let doc = compose(form, &state.page_config);
    let svg = render_svg(&doc);
    let filename = document_filename(form);

    info!(
        filename = %filename,
        rows = doc.panel1.table.rows.len(),
        "Composed hall-ticket page"
    );

    let path = state.sink.write(&filename, Bytes::from(svg)).await?;

    Ok(GenerateResponse {
        filename,
        path: path.display().to_string(),
        status: "generated".to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::{Notify, RwLock};

    use crate::config::Config;
    use crate::generation::gate::{GenerationGate, GenerationPhase};
    use crate::generation::sink::{DocumentSink, FileSink};
    use crate::layout::font_metrics::default_page_config;
    use crate::models::form::{Student, Subject};

    fn filled_form() -> FormState {
        let student = |n: &str| Student {
            name: n.to_string(),
            class_name: "V".to_string(),
            father_name: "Father".to_string(),
            hall_ticket_number: "001".to_string(),
        };
        FormState {
            student1: student("Anita"),
            student2: student("Bhavana"),
            subjects: vec![
                Subject {
                    name: "Telugu".to_string(),
                    date: "2025-08-12".to_string(),
                },
                Subject {
                    name: "English".to_string(),
                    date: "2025-08-13".to_string(),
                },
            ],
            ..FormState::default()
        }
    }

    fn test_state(form: FormState, sink: Arc<dyn DocumentSink>) -> AppState {
        AppState {
            form: Arc::new(RwLock::new(form)),
            gate: Arc::new(GenerationGate::new()),
            sink,
            config: Config {
                port: 0,
                output_dir: PathBuf::from("unused"),
                rust_log: "info".to_string(),
            },
            page_config: default_page_config(),
        }
    }

    /// Sink that holds every write until released — for in-flight tests.
    struct PendingSink {
        release: Arc<Notify>,
        inner: FileSink,
    }

    #[async_trait]
    impl DocumentSink for PendingSink {
        async fn write(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError> {
            self.release.notified().await;
            self.inner.write(filename, contents).await
        }
    }

    /// Sink that always fails without writing anything.
    struct FailingSink;

    #[async_trait]
    impl DocumentSink for FailingSink {
        async fn write(&self, _filename: &str, _contents: Bytes) -> Result<PathBuf, AppError> {
            Err(AppError::Generation("sink unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_writes_document_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = Arc::new(FileSink::new(dir.path().to_path_buf()));
        let state = test_state(filled_form(), sink);

        let response = handle_generate(State(state.clone()))
            .await
            .expect("generation succeeds");
        assert_eq!(response.0.filename, "Hall_Tickets_Anita.svg");
        assert_eq!(response.0.status, "generated");

        let svg = std::fs::read_to_string(dir.path().join("Hall_Tickets_Anita.svg"))
            .expect("document written");
        assert_eq!(svg.matches("HALL TICKET").count(), 2, "both copies rendered");
        assert_eq!(state.gate.phase(), GenerationPhase::Idle);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_form_without_touching_gate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = Arc::new(FileSink::new(dir.path().to_path_buf()));
        let mut form = filled_form();
        form.student2.name = String::new();
        let state = test_state(form, sink);

        let result = handle_generate(State(state.clone())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.gate.phase(), GenerationPhase::Idle);
        assert_eq!(
            std::fs::read_dir(dir.path()).expect("dir").count(),
            0,
            "nothing written for a rejected form"
        );
    }

    #[tokio::test]
    async fn test_concurrent_generation_rejected_not_interleaved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let release = Arc::new(Notify::new());
        let sink = Arc::new(PendingSink {
            release: release.clone(),
            inner: FileSink::new(dir.path().to_path_buf()),
        });
        let state = test_state(filled_form(), sink);

        let first = tokio::spawn(handle_generate(State(state.clone())));
        // Let the first request reach the held sink write.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(state.gate.phase(), GenerationPhase::Generating);

        let second = handle_generate(State(state.clone())).await;
        assert!(
            matches!(second, Err(AppError::GenerationInProgress)),
            "second request must be rejected while one is in flight"
        );

        release.notify_one();
        let first = first.await.expect("task joined").expect("first succeeds");
        assert_eq!(first.0.filename, "Hall_Tickets_Anita.svg");
        assert_eq!(state.gate.phase(), GenerationPhase::Idle);
    }

    #[tokio::test]
    async fn test_sink_failure_sets_failed_phase_and_allows_retry() {
        let state = test_state(filled_form(), Arc::new(FailingSink));

        let result = handle_generate(State(state.clone())).await;
        assert!(matches!(result, Err(AppError::Generation(_))));
        assert!(matches!(state.gate.phase(), GenerationPhase::Failed(_)));

        // Retry is admitted (and fails again at the sink, not the gate).
        let retry = handle_generate(State(state.clone())).await;
        assert!(matches!(retry, Err(AppError::Generation(_))));
    }

    #[tokio::test]
    async fn test_preview_matches_generated_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = Arc::new(FileSink::new(dir.path().to_path_buf()));
        let state = test_state(filled_form(), sink);

        let preview = handle_preview(State(state.clone())).await.expect("preview");
        assert_eq!(preview.0.school_copy.rows.len(), 6);
        assert_eq!(
            preview.0.school_copy.rows.iter().filter(|r| r.populated).count(),
            2
        );
        assert_eq!(preview.0.school_copy.rows[0].date, "12-Aug-2025");
        // Preview never claims the gate
        assert_eq!(state.gate.phase(), GenerationPhase::Idle);
    }

    #[tokio::test]
    async fn test_preview_rejects_partial_subject_row() {
        let mut form = filled_form();
        form.subjects.push(Subject {
            name: "Maths".to_string(),
            date: String::new(),
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let state = test_state(form, Arc::new(FileSink::new(dir.path().to_path_buf())));

        let result = handle_preview(State(state)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_document_filename_falls_back_to_student() {
        let mut form = filled_form();
        form.student1.name = "  ".to_string();
        assert_eq!(document_filename(&form), "Hall_Tickets_Student.svg");
        form.student1.name = "Anita".to_string();
        assert_eq!(document_filename(&form), "Hall_Tickets_Anita.svg");
    }
}
