//! Core traits for deckgen providers.

mod llm;
mod provider;

pub use llm::*;
pub use provider::*;
