use std::sync::Arc;

use crate::config::Config;
use crate::enrichment::EnrichmentRegistry;
use crate::gateway::GenerationGateway;
use crate::repository::ArtifactRepository;
use crate::wizard::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: GenerationGateway,
    pub sessions: SessionStore,
    pub enrichment: Arc<EnrichmentRegistry>,
    /// Pluggable submission backend. Default: in-memory; a durable
    /// collaborator swaps in here.
    pub repository: Arc<dyn ArtifactRepository>,
    pub config: Config,
}
