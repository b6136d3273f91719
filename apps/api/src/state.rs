use crate::extraction::ResumeExtractor;

/// Shared application state injected into route handlers via Axum extractors.
///
/// Each request's pipeline run is independent; the only process-wide state
/// is the extractor's configured credential, read-only for the run.
#[derive(Clone)]
pub struct AppState {
    pub extractor: ResumeExtractor,
}
