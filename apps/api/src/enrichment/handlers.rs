//! Axum route handlers for per-item enrichment.
//!
//! These calls bypass the step flow entirely: they read the draft to build
//! the prompt, then write only the enrichment registry — never the draft.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::enrichment::prompts::compose_enrichment;
use crate::enrichment::{EnrichmentEntry, EnrichmentKind};
use crate::errors::AppError;
use crate::models::course::CourseDraft;
use crate::state::AppState;
use crate::wizard::handlers::with_session;

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub owner_id: Uuid,
    pub kind: EnrichmentKind,
    #[serde(default)]
    pub user_context: String,
}

/// Title and body of the section or item named by `owner_id`.
fn owner_material(course: &CourseDraft, owner_id: Uuid) -> Option<(String, String)> {
    for section in &course.sections {
        if section.id == owner_id {
            return Some((section.title.clone(), section.description.clone()));
        }
        if let Some(item) = section.items.iter().find(|i| i.id == owner_id) {
            return Some((item.title.clone(), item.body.clone()));
        }
    }
    None
}

/// POST /api/v1/wizards/:id/enrichment
///
/// Generates one (owner, kind) enrichment and stores it in the registry.
pub async fn handle_enrich(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<EnrichmentEntry>, AppError> {
    let composed = with_session(&state.sessions, id, |s| {
        let course = s
            .draft
            .as_course()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        let (owner_title, owner_body) =
            owner_material(course, request.owner_id).ok_or_else(|| {
                AppError::NotFound(format!(
                    "no section or item {} in this draft",
                    request.owner_id
                ))
            })?;
        Ok(compose_enrichment(
            request.kind,
            &course.title,
            &owner_title,
            &owner_body,
            &request.user_context,
        ))
    })?;

    let text = state.gateway.send(&composed.prompt, composed.system).await?;
    let entry = state.enrichment.record(request.owner_id, request.kind, text)?;
    info!(
        "stored {:?} enrichment for owner {} in session {id}",
        request.kind, request.owner_id
    );
    Ok(Json(entry))
}

/// GET /api/v1/wizards/:id/enrichment/:owner_id
pub async fn handle_get_enrichment(
    State(state): State<AppState>,
    Path((id, owner_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<EnrichmentEntry>>, AppError> {
    // session lookup keeps the route honest even though entries live outside it
    with_session(&state.sessions, id, |_| Ok(()))?;
    Ok(Json(state.enrichment.entries_for(owner_id)?))
}
