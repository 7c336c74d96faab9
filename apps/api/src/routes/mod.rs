pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::form::handlers as form_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form API
        .route("/api/v1/form", get(form_handlers::handle_get_form))
        .route(
            "/api/v1/form/school",
            put(form_handlers::handle_update_school),
        )
        .route(
            "/api/v1/form/students/:which",
            put(form_handlers::handle_update_student),
        )
        .route(
            "/api/v1/form/subjects",
            post(form_handlers::handle_add_subject),
        )
        .route(
            "/api/v1/form/subjects/:index",
            put(form_handlers::handle_update_subject)
                .delete(form_handlers::handle_remove_subject),
        )
        // Ticket API
        .route(
            "/api/v1/tickets/preview",
            get(generation_handlers::handle_preview),
        )
        .route(
            "/api/v1/tickets/generate",
            post(generation_handlers::handle_generate),
        )
        .with_state(state)
}
