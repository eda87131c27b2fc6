use crate::letter::workflow::WorkflowController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single workflow for the process: one form, one attempt at a time.
    pub workflow: WorkflowController,
}
