use std::sync::Arc;

use crate::export::Exporter;
use crate::session::SharedSession;
use crate::suggestions::Suggester;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Every handler locks it for its synchronous part.
    pub session: SharedSession,
    /// Pluggable suggestion backend. Default: LlmSuggester (disabled without an API key).
    pub suggester: Arc<dyn Suggester>,
    pub exporter: Arc<dyn Exporter>,
}
