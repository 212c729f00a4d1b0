//! Per-item enrichment — generation results requested for one section or
//! item independently of the main wizard flow.
//!
//! Results live in a keyed registry, `owner id -> (kind -> entry)`, outside
//! the draft. A completed call writes only its own (owner, kind) slot, so a
//! late-arriving result for one kind can never erase another kind's stored
//! text. Two calls racing on the SAME slot are last-wins; each is an
//! individual user-triggered button press, so no ordering is promised.

pub mod handlers;
pub mod prompts;

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentKind {
    Video,
    Exercise,
    Reading,
    Assessment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentEntry {
    pub owner_id: Uuid,
    pub kind: EnrichmentKind,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// Slot-keyed store for enrichment results.
#[derive(Default)]
pub struct EnrichmentRegistry {
    slots: RwLock<HashMap<Uuid, HashMap<EnrichmentKind, EnrichmentEntry>>>,
}

impl EnrichmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one (owner, kind) slot and returns the stored entry.
    pub fn record(
        &self,
        owner_id: Uuid,
        kind: EnrichmentKind,
        text: String,
    ) -> Result<EnrichmentEntry, AppError> {
        let entry = EnrichmentEntry {
            owner_id,
            kind,
            text,
            generated_at: Utc::now(),
        };
        let mut slots = self
            .slots
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("enrichment registry lock poisoned")))?;
        slots.entry(owner_id).or_default().insert(kind, entry.clone());
        Ok(entry)
    }

    pub fn get(
        &self,
        owner_id: Uuid,
        kind: EnrichmentKind,
    ) -> Result<Option<EnrichmentEntry>, AppError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("enrichment registry lock poisoned")))?;
        Ok(slots.get(&owner_id).and_then(|k| k.get(&kind)).cloned())
    }

    /// All stored entries for one owner, in stable kind order.
    pub fn entries_for(&self, owner_id: Uuid) -> Result<Vec<EnrichmentEntry>, AppError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("enrichment registry lock poisoned")))?;
        let mut entries: Vec<EnrichmentEntry> = slots
            .get(&owner_id)
            .map(|kinds| kinds.values().cloned().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| format!("{:?}", e.kind));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_results_for_different_kinds_both_persist() {
        let registry = EnrichmentRegistry::new();
        let owner = Uuid::new_v4();

        // the "exercise" call completes after the "video" call even though
        // it was issued first — both slots must survive
        registry
            .record(owner, EnrichmentKind::Video, "video script".into())
            .unwrap();
        registry
            .record(owner, EnrichmentKind::Exercise, "practice set".into())
            .unwrap();

        let video = registry.get(owner, EnrichmentKind::Video).unwrap().unwrap();
        let exercise = registry
            .get(owner, EnrichmentKind::Exercise)
            .unwrap()
            .unwrap();
        assert_eq!(video.text, "video script");
        assert_eq!(exercise.text, "practice set");
    }

    #[test]
    fn test_same_slot_is_last_wins() {
        let registry = EnrichmentRegistry::new();
        let owner = Uuid::new_v4();
        registry
            .record(owner, EnrichmentKind::Video, "first".into())
            .unwrap();
        registry
            .record(owner, EnrichmentKind::Video, "second".into())
            .unwrap();
        let entry = registry.get(owner, EnrichmentKind::Video).unwrap().unwrap();
        assert_eq!(entry.text, "second");
        assert_eq!(registry.entries_for(owner).unwrap().len(), 1);
    }

    #[test]
    fn test_owners_are_isolated() {
        let registry = EnrichmentRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        registry
            .record(a, EnrichmentKind::Reading, "for a".into())
            .unwrap();
        assert!(registry.get(b, EnrichmentKind::Reading).unwrap().is_none());
        assert!(registry.entries_for(b).unwrap().is_empty());
    }

    #[test]
    fn test_entries_for_unknown_owner_is_empty() {
        let registry = EnrichmentRegistry::new();
        assert!(registry.entries_for(Uuid::new_v4()).unwrap().is_empty());
    }
}
