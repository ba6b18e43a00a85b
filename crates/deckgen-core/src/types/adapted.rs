//! Adapted resume types.

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::entity::{Entity, EntityId, EntityKind};
use super::job_ad::JobAd;

/// A resume tailored to a job ad.
///
/// Both fields are copies taken when the adaptation ran; later edits to the
/// stored job ad or candidate are not reflected here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptedResume {
    /// Identifier assigned by the store.
    pub id: EntityId,
    /// The job ad the resume was adapted for.
    pub job_ad: JobAd,
    /// The tailored resume.
    pub resume: Candidate,
}

impl AdaptedResume {
    /// Combine a job ad and a resume into an unsaved adapted resume.
    pub fn new(job_ad: JobAd, resume: Candidate) -> Self {
        Self {
            id: 0,
            job_ad,
            resume,
        }
    }
}

impl Entity for AdaptedResume {
    const KIND: EntityKind = EntityKind::AdaptedResume;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
