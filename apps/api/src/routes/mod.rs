pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::enrichment::handlers as enrichment_handlers;
use crate::state::AppState;
use crate::wizard::handlers as wizard_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard lifecycle and navigation
        .route("/api/v1/wizards", post(wizard_handlers::handle_create_wizard))
        .route("/api/v1/wizards/:id", get(wizard_handlers::handle_get_wizard))
        .route(
            "/api/v1/wizards/:id/advance",
            post(wizard_handlers::handle_advance),
        )
        .route(
            "/api/v1/wizards/:id/retreat",
            post(wizard_handlers::handle_retreat),
        )
        .route("/api/v1/wizards/:id/goto", post(wizard_handlers::handle_goto))
        // Direct draft edits
        .route(
            "/api/v1/wizards/:id/draft",
            patch(wizard_handlers::handle_patch_draft),
        )
        .route(
            "/api/v1/wizards/:id/sections",
            post(wizard_handlers::handle_add_section),
        )
        .route(
            "/api/v1/wizards/:id/sections/:sid",
            delete(wizard_handlers::handle_delete_section),
        )
        .route(
            "/api/v1/wizards/:id/sections/:sid/move",
            post(wizard_handlers::handle_move_section),
        )
        .route(
            "/api/v1/wizards/:id/sections/:sid/items",
            post(wizard_handlers::handle_add_item),
        )
        .route(
            "/api/v1/wizards/:id/sections/:sid/items/:iid",
            delete(wizard_handlers::handle_delete_item),
        )
        .route(
            "/api/v1/wizards/:id/quiz/questions/:qid",
            delete(wizard_handlers::handle_delete_question),
        )
        // Generation pipeline
        .route(
            "/api/v1/wizards/:id/generate",
            post(wizard_handlers::handle_generate),
        )
        .route(
            "/api/v1/wizards/:id/apply",
            post(wizard_handlers::handle_apply),
        )
        .route(
            "/api/v1/wizards/:id/generate-image",
            post(wizard_handlers::handle_generate_image),
        )
        .route(
            "/api/v1/wizards/:id/submit",
            post(wizard_handlers::handle_submit),
        )
        // Per-item enrichment
        .route(
            "/api/v1/wizards/:id/enrichment",
            post(enrichment_handlers::handle_enrich),
        )
        .route(
            "/api/v1/wizards/:id/enrichment/:owner_id",
            get(enrichment_handlers::handle_get_enrichment),
        )
        .with_state(state)
}
