//! Workflow Controller: the per-attempt state machine behind the cover letter form.
//!
//! Idle → Submitting → Succeeded | Failed, re-entrant with no terminal state.
//! The controller also owns the form draft so edits keep flowing while an
//! attempt is in flight.
//!
//! Only one attempt may be in flight. The check-and-set happens under the
//! state lock in `begin_attempt`, so the guard holds no matter how many
//! callers reach `submit`. The attempt itself runs on a spawned task: a caller
//! that stops awaiting cannot leave the machine stuck in `Submitting`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::letter::models::{CandidateInput, DraftUpdate};
use crate::letter::prompts::build_cover_letter_prompt;
use crate::llm_client::{GenerationError, SamplingConfig, TextGenerator};

/// The only failure text a user ever sees, whatever went wrong upstream.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "We encountered an error crafting your letter. Please check your inputs and try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedLetter {
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Submitting {
        attempt_id: Uuid,
        started_at: DateTime<Utc>,
    },
    Succeeded {
        attempt_id: Uuid,
        letter: GeneratedLetter,
    },
    Failed {
        attempt_id: Uuid,
        message: String,
    },
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting { .. })
    }

    pub fn attempt_id(&self) -> Option<Uuid> {
        match self {
            WorkflowState::Idle => None,
            WorkflowState::Submitting { attempt_id, .. }
            | WorkflowState::Succeeded { attempt_id, .. }
            | WorkflowState::Failed { attempt_id, .. } => Some(*attempt_id),
        }
    }

    fn failed(attempt_id: Uuid) -> Self {
        WorkflowState::Failed {
            attempt_id,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("A generation attempt is already in flight")]
    AttemptInFlight,
}

#[derive(Clone)]
pub struct WorkflowController {
    generator: Arc<dyn TextGenerator>,
    state: Arc<Mutex<WorkflowState>>,
    draft: Arc<Mutex<CandidateInput>>,
}

impl WorkflowController {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            state: Arc::new(Mutex::new(WorkflowState::Idle)),
            draft: Arc::new(Mutex::new(CandidateInput::default())),
        }
    }

    pub async fn state(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    pub async fn draft(&self) -> CandidateInput {
        self.draft.lock().await.clone()
    }

    /// Applies a partial edit. Accepted in every state; an in-flight attempt
    /// already holds its own snapshot and is unaffected.
    pub async fn update_draft(&self, update: DraftUpdate) -> CandidateInput {
        let mut draft = self.draft.lock().await;
        draft.apply(update);
        draft.clone()
    }

    pub async fn replace_draft(&self, input: CandidateInput) {
        *self.draft.lock().await = input;
    }

    /// Runs one generation attempt for `input` and returns the state it ended in.
    ///
    /// Fails only when another attempt is in flight; generation failures
    /// come back as `Ok(WorkflowState::Failed { .. })`.
    pub async fn submit(&self, input: CandidateInput) -> Result<WorkflowState, WorkflowError> {
        let attempt_id = self.begin_attempt(None).await?;
        self.await_attempt(attempt_id, input).await
    }

    /// Like [`submit`](Self::submit), but `input` also becomes the stored
    /// draft once the attempt is accepted. A rejected submission leaves the
    /// draft as it was.
    pub async fn submit_as_draft(
        &self,
        input: CandidateInput,
    ) -> Result<WorkflowState, WorkflowError> {
        let attempt_id = self.begin_attempt(Some(&input)).await?;
        self.await_attempt(attempt_id, input).await
    }

    async fn await_attempt(
        &self,
        attempt_id: Uuid,
        input: CandidateInput,
    ) -> Result<WorkflowState, WorkflowError> {

        let controller = self.clone();
        let attempt =
            tokio::spawn(async move { controller.run_attempt(attempt_id, input).await });

        match attempt.await {
            Ok(state) => Ok(state),
            Err(join_error) => {
                error!(%attempt_id, "Generation attempt task aborted: {join_error}");
                Ok(self.finish(WorkflowState::failed(attempt_id)).await)
            }
        }
    }

    /// Lock order is state, then draft.
    async fn begin_attempt(
        &self,
        new_draft: Option<&CandidateInput>,
    ) -> Result<Uuid, WorkflowError> {
        let mut state = self.state.lock().await;

        if let WorkflowState::Submitting { attempt_id, .. } = &*state {
            warn!(in_flight = %attempt_id, "Rejected submission while an attempt is in flight");
            return Err(WorkflowError::AttemptInFlight);
        }

        if let Some(input) = new_draft {
            *self.draft.lock().await = input.clone();
        }

        let attempt_id = Uuid::new_v4();
        // Replacing the state drops any previous letter or error right away.
        *state = WorkflowState::Submitting {
            attempt_id,
            started_at: Utc::now(),
        };

        info!(%attempt_id, "Cover letter generation started");
        Ok(attempt_id)
    }

    async fn run_attempt(&self, attempt_id: Uuid, input: CandidateInput) -> WorkflowState {
        let prompt = build_cover_letter_prompt(&input);

        // Separate task so a panicking generator still lands in Failed.
        let generator = Arc::clone(&self.generator);
        let call = tokio::spawn(async move {
            generator
                .generate(&prompt, &SamplingConfig::COVER_LETTER)
                .await
        });

        let next = match call.await {
            Ok(Ok(content)) if !content.is_empty() => {
                info!(%attempt_id, chars = content.len(), "Cover letter generated");
                WorkflowState::Succeeded {
                    attempt_id,
                    letter: GeneratedLetter {
                        content,
                        generated_at: Utc::now(),
                    },
                }
            }
            Ok(Ok(_)) => {
                error!(%attempt_id, "Cover letter generation failed: {}", GenerationError::EmptyContent);
                WorkflowState::failed(attempt_id)
            }
            Ok(Err(e)) => {
                error!(%attempt_id, "Cover letter generation failed: {e}");
                WorkflowState::failed(attempt_id)
            }
            Err(join_error) => {
                error!(%attempt_id, "Cover letter generation panicked: {join_error}");
                WorkflowState::failed(attempt_id)
            }
        };

        self.finish(next).await
    }

    async fn finish(&self, next: WorkflowState) -> WorkflowState {
        let mut state = self.state.lock().await;
        *state = next.clone();
        next
    }
}
