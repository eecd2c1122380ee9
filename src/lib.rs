//! Roommate Algo - compatibility scoring and matching service for the campus app
//!
//! The core is a pure scorer that compares two sparse preference profiles
//! across twelve weighted dimensions and explains the result per dimension.
//! Around it sit a ranking step, a Supabase client and the HTTP routes.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_similarity, compute_match, Dimension, Matcher};
pub use models::{MatchDimension, MatchResult, PreferenceProfile, RankedMatch};
