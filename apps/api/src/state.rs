use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client behind a trait object so tests can swap in a double.
    pub model: Arc<dyn GenerativeModel>,
    pub config: Config,
}
