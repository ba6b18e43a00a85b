//! Candidate resume types.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

/// One work-experience record of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company_name: String,
    pub dates: String,
    pub job_title: String,
    pub description: String,
    pub tools: String,
}

/// A candidate resume extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    /// Identifier assigned by the store.
    pub id: EntityId,
    pub full_name: String,
    pub description: String,
    pub short_description: String,
    /// Work experience, most relevant first as written in the resume.
    pub experiences: Vec<Experience>,
    pub certifications: Vec<String>,
    pub skills: Vec<String>,
    pub location: String,
    pub availability: String,
    pub facturation: String,
    pub average_daily_rate: String,
    pub billing_mode: String,
}

impl Candidate {
    /// Create a candidate with just a name.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    /// Append a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Append a work-experience record.
    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experiences.push(experience);
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

impl Entity for Candidate {
    const KIND: EntityKind = EntityKind::Candidate;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_defaults_missing_fields() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"full_name": "A. Dupont", "skills": ["Rust"]}"#).unwrap();
        assert_eq!(candidate.id, 0);
        assert_eq!(candidate.full_name, "A. Dupont");
        assert_eq!(candidate.skills, vec!["Rust"]);
        assert!(candidate.experiences.is_empty());
    }
}
