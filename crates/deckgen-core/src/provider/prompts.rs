//! Prompt templates for extraction and adaptation.
//!
//! Each system prompt embeds the exact JSON layout expected back, rendered
//! from the entity types themselves so the prompt cannot drift from the
//! structs the reply is parsed into.

use serde::Serialize;

use deckgen_extractors::ParsedDocument;

use crate::error::DeckgenResult;
use crate::types::{Candidate, Experience, JobAd};

/// Render an example JSON object for `T`, without the store-managed `id`.
fn json_layout<T: Serialize>(value: &T) -> String {
    let mut json = serde_json::to_value(value).unwrap_or_default();
    if let Some(object) = json.as_object_mut() {
        object.remove("id");
    }
    serde_json::to_string_pretty(&json).unwrap_or_default()
}

fn candidate_layout() -> String {
    json_layout(&Candidate::default().with_experience(Experience::default()))
}

/// System prompt for turning resume text into a [`Candidate`].
pub fn resume_extraction_prompt() -> String {
    format!(
        r#"You analyze the raw text of a resume file.
Extract the information and structure it into a single JSON object with exactly this layout:

{}

Instructions:
1. Identify the professional summary, work experience, skills and certifications.
2. Populate every field as accurately as possible; use empty strings or empty lists when the resume says nothing.
3. Keep experiences in the order they appear in the resume.
4. The output MUST be a single, valid JSON object. Do not include any text, markdown, or commentary outside of the JSON object."#,
        candidate_layout()
    )
}

/// System prompt for turning job advertisement text into a [`JobAd`].
pub fn job_ad_extraction_prompt() -> String {
    format!(
        r#"You analyze the raw text of a job advertisement.
Extract the information and structure it into a single JSON object with exactly this layout:

{}

Instructions:
1. Identify the job title, company name, location, responsibilities and qualifications.
2. Split responsibilities and qualifications into short list items, in document order.
3. Put the complete advertisement text in "raw_text".
4. The output MUST be a single, valid JSON object. Do not include any text, markdown, or commentary outside of the JSON object."#,
        json_layout(&JobAd::default())
    )
}

/// System prompt for tailoring resumes to a job ad.
pub fn adaptation_prompt() -> String {
    format!(
        r#"You receive a job advertisement and one or more resumes of the same candidate.
Generate a new, adapted resume that highlights the candidate's most relevant skills and experiences for this specific job.

Instructions:
1. Read the job advertisement to understand the key requirements, skills and responsibilities.
2. Review every resume provided to understand the candidate's background and accomplishments.
3. Write compelling, concise, action-oriented content; never invent employers, dates or certifications.
4. The output MUST be a single, valid JSON object with exactly this layout:

{}"#,
        candidate_layout()
    )
}

/// User message carrying a parsed document.
pub fn build_document_message(kind: &str, document: &ParsedDocument) -> String {
    format!(
        "Input data (raw text from {} '{}'):\n---\n{}",
        kind, document.name, document.text
    )
}

/// User message carrying the job ad and the numbered resumes.
pub fn build_adaptation_message(job_ad: &JobAd, candidates: &[Candidate]) -> DeckgenResult<String> {
    let mut message = format!(
        "--- Job Advertisement ---\n{}\n\n--- Candidate Resumes ---",
        serde_json::to_string(job_ad)?
    );
    for (index, candidate) in candidates.iter().enumerate() {
        message.push_str(&format!(
            "\n--- Candidate Resume {} ---\n{}",
            index + 1,
            serde_json::to_string(candidate)?
        ));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_describe_layout_without_id() {
        let prompt = resume_extraction_prompt();
        assert!(prompt.contains("\"full_name\""));
        assert!(prompt.contains("\"experiences\""));
        assert!(!prompt.contains("\"id\""));

        assert!(job_ad_extraction_prompt().contains("\"required_qualifications\""));
    }

    #[test]
    fn test_adaptation_message_numbers_resumes() {
        let job = JobAd::new("Backend Engineer");
        let resumes = vec![Candidate::new("A. Dupont"), Candidate::new("A. Dupont (2019)")];

        let message = build_adaptation_message(&job, &resumes).unwrap();
        assert!(message.contains("Backend Engineer"));
        assert!(message.contains("--- Candidate Resume 1 ---"));
        assert!(message.contains("--- Candidate Resume 2 ---"));
    }

    #[test]
    fn test_document_message_includes_text() {
        let doc = ParsedDocument::from_text("cv.txt", "Rust developer, 8 years");
        let message = build_document_message("resume", &doc);
        assert!(message.contains("cv.txt"));
        assert!(message.contains("Rust developer, 8 years"));
    }
}
