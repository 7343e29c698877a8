//! Cached advice domain
//!
//! Answers to health questions and symptom lookups are kept in a store and
//! reused; a miss is answered by the text-completion collaborator and then
//! persisted.

mod entry;
mod store;

pub use entry::{Advice, AdviceEntry, MatchPolicy, Provenance};
pub use store::AdviceStore;

#[cfg(test)]
pub use store::mock::MockAdviceStore;
