//! Axum route handlers for the cover letter form.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::letter::models::{CandidateInput, DraftUpdate, FormField, FORM_FIELDS};
use crate::letter::workflow::{WorkflowController, WorkflowState};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LetterStatusResponse {
    pub state: WorkflowState,
    pub submit_enabled: bool,
}

impl LetterStatusResponse {
    async fn from_controller(workflow: &WorkflowController) -> Self {
        let state = workflow.state().await;
        let submit_enabled = !state.is_submitting();
        Self {
            state,
            submit_enabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub fields: &'static [FormField],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/letter/form
pub async fn handle_get_form() -> Json<FormResponse> {
    Json(FormResponse {
        fields: &FORM_FIELDS,
    })
}

/// GET /api/v1/letter/draft
pub async fn handle_get_draft(State(state): State<AppState>) -> Json<CandidateInput> {
    Json(state.workflow.draft().await)
}

/// PATCH /api/v1/letter/draft
///
/// Accepted while a letter is generating; the in-flight attempt keeps its snapshot.
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Json(update): Json<DraftUpdate>,
) -> Json<CandidateInput> {
    Json(state.workflow.update_draft(update).await)
}

/// GET /api/v1/letter
pub async fn handle_get_letter(State(state): State<AppState>) -> Json<LetterStatusResponse> {
    Json(LetterStatusResponse::from_controller(&state.workflow).await)
}

/// POST /api/v1/letter/generate
///
/// An empty body submits the stored draft. Otherwise the body must be a JSON
/// candidate; it becomes the stored draft once the attempt is accepted.
/// All six fields are required. Waits for the attempt and returns its final
/// state, which may be `failed`.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LetterStatusResponse>, AppError> {
    let supplied = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let candidate = serde_json::from_slice::<CandidateInput>(&body)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;
        Some(candidate)
    };
    let candidate = match &supplied {
        Some(candidate) => candidate.clone(),
        None => state.workflow.draft().await,
    };

    let missing = candidate.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Required fields are empty: {}",
            missing.join(", ")
        )));
    }

    let final_state = match supplied {
        Some(candidate) => state.workflow.submit_as_draft(candidate).await?,
        None => state.workflow.submit(candidate).await?,
    };
    debug!(attempt_id = ?final_state.attempt_id(), "Generate request finished");

    Ok(Json(LetterStatusResponse {
        submit_enabled: !final_state.is_submitting(),
        state: final_state,
    }))
}
