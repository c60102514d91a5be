use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-user or per-generation data.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, scripted in tests.
    pub llm: Arc<dyn CompletionModel>,
    pub config: Config,
}
