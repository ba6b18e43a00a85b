//! Entity identity shared by every stored record kind.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Identifier assigned by an entity store. Sequences start at 1.
pub type EntityId = u64;

/// The record kinds managed by deckgen, one store per kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    JobAd,
    Candidate,
    AdaptedResume,
}

impl EntityKind {
    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::JobAd => "job ad",
            EntityKind::Candidate => "resume",
            EntityKind::AdaptedResume => "adapted resume",
        }
    }
}

/// A record that can live in an [`EntityStore`](crate::store::EntityStore).
///
/// The store owns the identifier: it overwrites whatever `id` a value carries
/// on create and never changes it afterwards.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind of this record.
    const KIND: EntityKind;

    /// Current identifier (0 before the record has been stored).
    fn id(&self) -> EntityId;

    /// Overwrite the identifier.
    fn set_id(&mut self, id: EntityId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_display_round_trip() {
        assert_eq!(EntityKind::AdaptedResume.to_string(), "adapted_resume");
        assert_eq!(EntityKind::from_str("job_ad").unwrap(), EntityKind::JobAd);
        assert_eq!(EntityKind::Candidate.label(), "resume");
    }
}
