//! Artifact repository — the seam the finished draft crosses at submission.
//!
//! Pluggable behind `Arc<dyn ArtifactRepository>` in `AppState`. The default
//! backend keeps submissions in memory; durable storage belongs to an
//! external collaborator and plugs in here without touching handler code.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::AuthoringDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedArtifact {
    pub artifact_id: Uuid,
    pub status: SubmitStatus,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn submit(
        &self,
        draft: AuthoringDraft,
        status: SubmitStatus,
    ) -> Result<SubmittedArtifact, AppError>;
}

struct StoredSubmission {
    artifact: SubmittedArtifact,
    draft: AuthoringDraft,
}

/// Default backend: submissions held in process memory.
#[derive(Default)]
pub struct InMemoryArtifactRepository {
    submissions: RwLock<Vec<StoredSubmission>>,
}

impl InMemoryArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.submissions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn get(&self, artifact_id: Uuid) -> Option<AuthoringDraft> {
        self.submissions
            .read()
            .ok()?
            .iter()
            .find(|s| s.artifact.artifact_id == artifact_id)
            .map(|s| s.draft.clone())
    }
}

#[async_trait]
impl ArtifactRepository for InMemoryArtifactRepository {
    async fn submit(
        &self,
        draft: AuthoringDraft,
        status: SubmitStatus,
    ) -> Result<SubmittedArtifact, AppError> {
        let artifact = SubmittedArtifact {
            artifact_id: Uuid::new_v4(),
            status,
            submitted_at: Utc::now(),
        };
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("repository lock poisoned")))?;
        submissions.push(StoredSubmission {
            artifact: artifact.clone(),
            draft,
        });
        info!(
            "recorded {:?} submission {} ({} total)",
            artifact.status,
            artifact.artifact_id,
            submissions.len()
        );
        Ok(artifact)
    }
}
