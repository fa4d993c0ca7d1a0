use std::sync::Arc;

use crate::sessions::SessionStore;
use crate::summarize::Summarizer;
use crate::wordcloud::Visualizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-session documents and results, in memory only. Sessions are
    /// isolated from each other behind this store.
    pub sessions: SessionStore,
    /// Pluggable summarization backend. Production: `RemoteSummarizer`.
    pub summarizer: Arc<dyn Summarizer>,
    /// Pluggable word-cloud backend. Production: `WordcloudRenderer`.
    pub visualizer: Arc<dyn Visualizer>,
}
