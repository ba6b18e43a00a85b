//! LLM-backed extraction and adaptation.

pub mod json_parser;
mod llm_provider;
pub mod prompts;

pub use json_parser::{extract_json, parse_reply};
pub use llm_provider::LlmExtractionProvider;
