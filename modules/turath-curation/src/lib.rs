//! Candidate persistence and the curation workflow.
//!
//! The similarity engine is pure; everything stateful lives here: the
//! storage boundary (`CatalogStore`, with Postgres and in-memory
//! implementations), the batch comparison activity that persists pending
//! candidates for newly ingested games, and the accept/reject/postpone
//! state machine curators drive from the review queue.

pub mod activities;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod workflow;

pub use activities::{compare_new_game, find_similar_games, CompareStats};
pub use memory::MemoryStore;
pub use models::{Concept, MatchStatus, PendingMatch, SimilarityCandidate};
pub use postgres::PgCatalogStore;
pub use store::{CatalogStore, ConceptRef, NewCandidate, NewConcept};
pub use workflow::{
    accept_match, get_pending_matches, match_status_counts, postpone_match, reject_match,
    MatchStatusCounts,
};
