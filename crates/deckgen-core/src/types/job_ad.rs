//! Job advertisement types.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

/// A job advertisement extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobAd {
    /// Identifier assigned by the store.
    pub id: EntityId,
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company_name: String,
    /// Job location.
    pub location: String,
    /// Key responsibilities, in document order.
    pub key_responsibilities: Vec<String>,
    /// Required qualifications, in document order.
    pub required_qualifications: Vec<String>,
    /// Preferred qualifications, in document order.
    pub preferred_qualifications: Vec<String>,
    /// Raw text of the source document.
    pub raw_text: String,
}

impl JobAd {
    /// Create a job ad with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the company name.
    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = company_name.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Append a required qualification.
    pub fn with_required_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.required_qualifications.push(qualification.into());
        self
    }

    /// Set the raw source text.
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }
}

impl Entity for JobAd {
    const KIND: EntityKind = EntityKind::JobAd;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
