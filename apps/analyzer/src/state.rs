use crate::analysis::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline with its store, repository and completion client wired in.
    pub analyzer: Analyzer,
}
