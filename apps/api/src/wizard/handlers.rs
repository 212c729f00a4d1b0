//! Axum route handlers for the wizard API.
//!
//! Locking discipline: session-store critical sections are short and never
//! span a gateway await. A generation call snapshots what it needs, awaits
//! with no lock held, then re-acquires the store to deliver its result —
//! where the request counter decides whether the result is still current.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_modules, extract_questions};
use crate::models::course::ItemKind;
use crate::models::{AuthoringDraft, WizardDomain};
use crate::repository::{SubmitStatus, SubmittedArtifact};
use crate::state::AppState;
use crate::wizard::compose::compose;
use crate::wizard::materialize::materialize;
use crate::wizard::{
    AuthoringMode, PendingSuggestion, SessionStore, StepId, SuggestionPayload, WizardSession,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateWizardRequest {
    pub domain: WizardDomain,
}

#[derive(Debug, Serialize)]
pub struct WizardSnapshot {
    pub id: Uuid,
    pub domain: WizardDomain,
    pub steps: Vec<StepId>,
    pub current: usize,
    pub current_step: StepId,
    pub step_validity: Vec<bool>,
    pub draft: AuthoringDraft,
    pub pending_modes: Vec<AuthoringMode>,
    pub submitted: bool,
}

#[derive(Debug, Deserialize)]
pub struct GoToRequest {
    pub index: usize,
}

/// Partial update of the draft's scalar fields. Fields of the other domain
/// are rejected, not silently dropped.
#[derive(Debug, Default, Deserialize)]
pub struct DraftPatch {
    // course fields
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub price_usd: Option<f64>,
    pub cover_image_url: Option<String>,
    // application fields
    pub company: Option<String>,
    pub role_title: Option<String>,
    pub job_description: Option<String>,
    pub resume_text: Option<String>,
    pub tailored_resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveSectionRequest {
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub mode: AuthoringMode,
    #[serde(default)]
    pub user_context: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub mode: AuthoringMode,
    /// The collaborator's text, surfaced verbatim.
    pub suggestion: String,
    /// Canonical preview for schema-bearing modes.
    pub payload: Option<SuggestionPayload>,
    /// False when a newer request at the same call site superseded this one
    /// while it was in flight; the result was discarded, not kept pending.
    pub stored: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub mode: AuthoringMode,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub status: SubmitStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Store access helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn with_session<T>(
    store: &SessionStore,
    id: Uuid,
    f: impl FnOnce(&WizardSession) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let sessions = store
        .read()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session store lock poisoned")))?;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("wizard session {id} not found")))?;
    f(session)
}

fn with_session_mut<T>(
    store: &SessionStore,
    id: Uuid,
    f: impl FnOnce(&mut WizardSession) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut sessions = store
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session store lock poisoned")))?;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("wizard session {id} not found")))?;
    f(session)
}

fn snapshot_of(session: &WizardSession) -> WizardSnapshot {
    let mut pending_modes: Vec<AuthoringMode> = session.pending.keys().copied().collect();
    pending_modes.sort_by_key(|m| format!("{m:?}"));
    WizardSnapshot {
        id: session.id,
        domain: session.domain,
        steps: session.steps.clone(),
        current: session.current,
        current_step: session.steps[session.current],
        step_validity: (0..session.steps.len())
            .map(|i| session.is_step_valid(i))
            .collect(),
        draft: session.draft.clone(),
        pending_modes,
        submitted: session.submitted,
    }
}

fn apply_patch(draft: &mut AuthoringDraft, patch: DraftPatch) -> Result<(), AppError> {
    let has_course_fields = patch.title.is_some()
        || patch.subtitle.is_some()
        || patch.description.is_some()
        || patch.short_description.is_some()
        || patch.category.is_some()
        || patch.price_usd.is_some()
        || patch.cover_image_url.is_some();
    let has_application_fields = patch.company.is_some()
        || patch.role_title.is_some()
        || patch.job_description.is_some()
        || patch.resume_text.is_some()
        || patch.tailored_resume.is_some()
        || patch.cover_letter.is_some();

    match draft {
        AuthoringDraft::Course(course) => {
            if has_application_fields {
                return Err(AppError::Validation(
                    "patch contains application fields but the draft is a course".to_string(),
                ));
            }
            if let Some(v) = patch.title {
                course.title = v;
            }
            if let Some(v) = patch.subtitle {
                course.subtitle = v;
            }
            if let Some(v) = patch.description {
                course.description = v;
            }
            if let Some(v) = patch.short_description {
                course.short_description = v;
            }
            if let Some(v) = patch.category {
                course.category = v;
            }
            if let Some(v) = patch.price_usd {
                course.price_usd = Some(v);
            }
            if let Some(v) = patch.cover_image_url {
                course.cover_image_url = Some(v);
            }
        }
        AuthoringDraft::Application(app) => {
            if has_course_fields {
                return Err(AppError::Validation(
                    "patch contains course fields but the draft is an application".to_string(),
                ));
            }
            if let Some(v) = patch.company {
                app.company = v;
            }
            if let Some(v) = patch.role_title {
                app.role_title = v;
            }
            if let Some(v) = patch.job_description {
                app.job_description = v;
            }
            if let Some(v) = patch.resume_text {
                app.resume_text = v;
            }
            if let Some(v) = patch.tailored_resume {
                app.tailored_resume = Some(v);
            }
            if let Some(v) = patch.cover_letter {
                app.cover_letter = Some(v);
            }
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle and navigation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizards
pub async fn handle_create_wizard(
    State(state): State<AppState>,
    Json(request): Json<CreateWizardRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = WizardSession::new(request.domain);
    let snapshot = snapshot_of(&session);
    let mut sessions = state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session store lock poisoned")))?;
    info!("created {:?} wizard session {}", request.domain, session.id);
    sessions.insert(session.id, session);
    Ok(Json(snapshot))
}

/// GET /api/v1/wizards/:id
pub async fn handle_get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session(&state.sessions, id, |s| Ok(Json(snapshot_of(s))))
}

/// POST /api/v1/wizards/:id/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.advance();
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/retreat
pub async fn handle_retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.retreat();
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/goto
pub async fn handle_goto(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GoToRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.go_to(request.index);
        Ok(Json(snapshot_of(s)))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Direct draft edits
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/wizards/:id/draft
pub async fn handle_patch_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        apply_patch(&mut s.draft, patch)?;
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddSectionRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("section title cannot be empty".to_string()));
    }
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        course.add_section(request.title, request.description);
        Ok(Json(snapshot_of(s)))
    })
}

/// DELETE /api/v1/wizards/:id/sections/:sid
pub async fn handle_delete_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        if !course.remove_section(section_id) {
            return Err(AppError::NotFound(format!("section {section_id} not found")));
        }
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/sections/:sid/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<MoveSectionRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        if !course.move_section(section_id, request.to) {
            return Err(AppError::NotFound(format!("section {section_id} not found")));
        }
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/sections/:sid/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("item title cannot be empty".to_string()));
    }
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        let section = course
            .section_mut(section_id)
            .ok_or_else(|| AppError::NotFound(format!("section {section_id} not found")))?;
        section.add_item(request.kind, request.title, request.body, request.duration);
        Ok(Json(snapshot_of(s)))
    })
}

/// DELETE /api/v1/wizards/:id/sections/:sid/items/:iid
pub async fn handle_delete_item(
    State(state): State<AppState>,
    Path((id, section_id, item_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        let section = course
            .section_mut(section_id)
            .ok_or_else(|| AppError::NotFound(format!("section {section_id} not found")))?;
        if !section.remove_item(item_id) {
            return Err(AppError::NotFound(format!("item {item_id} not found")));
        }
        Ok(Json(snapshot_of(s)))
    })
}

/// DELETE /api/v1/wizards/:id/quiz/questions/:qid
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        let quiz = course
            .quiz
            .as_mut()
            .ok_or_else(|| AppError::NotFound("draft has no quiz".to_string()))?;
        if !quiz.remove_question(question_id) {
            return Err(AppError::NotFound(format!("question {question_id} not found")));
        }
        Ok(Json(snapshot_of(s)))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Generation, apply, submit
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizards/:id/generate
///
/// Composes the mode's prompt against the current draft snapshot, calls the
/// gateway, and — for schema-bearing modes — runs extraction. The result is
/// kept as a pending suggestion for an explicit apply; it is NOT merged into
/// the draft here.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mode = request.mode;
    let (composed, seq) = with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let composed = compose(mode, &s.draft, &request.user_context)?;
        Ok((composed, s.issue_request(mode)))
    })?;

    let raw = state.gateway.send(&composed.prompt, composed.system).await?;

    let payload = match mode {
        AuthoringMode::ModuleStructure => {
            Some(SuggestionPayload::Modules(extract_modules(&raw)?))
        }
        AuthoringMode::Quiz => Some(SuggestionPayload::Questions(extract_questions(&raw)?)),
        _ => None,
    };

    let stored = with_session_mut(&state.sessions, id, |s| {
        if !s.is_latest(mode, seq) {
            debug!("discarding stale {mode:?} result for session {id}");
            return Ok(false);
        }
        s.store_pending(PendingSuggestion {
            mode,
            raw: raw.clone(),
            payload: payload.clone(),
            generated_at: Utc::now(),
        });
        Ok(true)
    })?;

    info!("generated {mode:?} suggestion for session {id} (stored: {stored})");
    Ok(Json(GenerateResponse {
        mode,
        suggestion: raw,
        payload,
        stored,
    }))
}

/// POST /api/v1/wizards/:id/apply
///
/// The explicit user confirmation that merges a pending suggestion into the
/// draft. All-or-nothing: on a merge error the suggestion is put back.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let suggestion = s.take_pending(request.mode).ok_or_else(|| {
            AppError::NotFound(format!("no pending suggestion for mode {:?}", request.mode))
        })?;
        if let Err(e) = materialize(&mut s.draft, &suggestion) {
            s.store_pending(suggestion);
            return Err(e);
        }
        info!("applied {:?} suggestion to session {id}", request.mode);
        Ok(Json(snapshot_of(s)))
    })
}

/// POST /api/v1/wizards/:id/generate-image
///
/// The one auto-applying generation: the returned URL lands on the draft
/// without a separate confirmation step.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }
    with_session(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        if s.draft.as_course().is_none() {
            return Err(AppError::Validation("draft is not a course".to_string()));
        }
        Ok(())
    })?;

    let image_url = state.gateway.send_image(&request.prompt).await?;

    with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        let course = s
            .draft
            .as_course_mut()
            .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))?;
        course.cover_image_url = Some(image_url.clone());
        Ok(())
    })?;

    Ok(Json(GenerateImageResponse { image_url }))
}

/// POST /api/v1/wizards/:id/submit
///
/// Terminal: hands the draft to the artifact repository. The session is
/// frozen first so no edit can race the handoff; it is unfrozen only if the
/// repository rejects the draft.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmittedArtifact>, AppError> {
    let draft = with_session_mut(&state.sessions, id, |s| {
        s.ensure_mutable()?;
        s.submitted = true;
        Ok(s.draft.clone())
    })?;

    match state.repository.submit(draft, request.status).await {
        Ok(artifact) => {
            info!("submitted session {id} as artifact {}", artifact.artifact_id);
            Ok(Json(artifact))
        }
        Err(e) => {
            with_session_mut(&state.sessions, id, |s| {
                s.submitted = false;
                Ok(())
            })?;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch_rejects_cross_domain_fields() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let patch = DraftPatch {
            company: Some("Acme".into()),
            ..Default::default()
        };
        assert!(apply_patch(&mut draft, patch).is_err());
    }

    #[test]
    fn test_apply_patch_sets_course_scalars() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let patch = DraftPatch {
            title: Some("Practical Rust".into()),
            price_usd: Some(79.0),
            ..Default::default()
        };
        apply_patch(&mut draft, patch).unwrap();
        let course = draft.as_course().unwrap();
        assert_eq!(course.title, "Practical Rust");
        assert_eq!(course.price_usd, Some(79.0));
        assert!(course.description.is_empty()); // untouched
    }

    #[test]
    fn test_apply_patch_sets_application_scalars() {
        let mut draft = AuthoringDraft::new(WizardDomain::Application);
        let patch = DraftPatch {
            cover_letter: Some("Dear team,".into()),
            ..Default::default()
        };
        apply_patch(&mut draft, patch).unwrap();
        assert_eq!(
            draft.as_application().unwrap().cover_letter.as_deref(),
            Some("Dear team,")
        );
    }

    #[test]
    fn test_snapshot_reports_step_state() {
        let session = WizardSession::new(WizardDomain::Application);
        let snapshot = snapshot_of(&session);
        assert_eq!(snapshot.current, 0);
        assert_eq!(snapshot.current_step, StepId::JobPosting);
        assert_eq!(snapshot.step_validity.len(), snapshot.steps.len());
        assert!(!snapshot.submitted);
        assert!(snapshot.pending_modes.is_empty());
    }
}
