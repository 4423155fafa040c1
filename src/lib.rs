//! Vivah Algo - match-scoring service for the Vivah matrimonial platform
//!
//! This library provides the preference-weighted matching engine used by the
//! Vivah backend: a pure scorer over six criteria dimensions, a paginated
//! candidate finder, and the interested-user fanout that drives new-profile
//! match notifications.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, find_interested_users, MatchPage, Matcher};
pub use crate::models::{
    CriteriaWeights, FindMatchesRequest, InterestedUser, Preference, Profile,
    SavePreferenceRequest, ScoredMatch,
};
