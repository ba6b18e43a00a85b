//! Core types for deckgen.

mod adapted;
mod candidate;
mod entity;
mod job_ad;
mod message;

pub use adapted::*;
pub use candidate::*;
pub use entity::*;
pub use job_ad::*;
pub use message::*;
