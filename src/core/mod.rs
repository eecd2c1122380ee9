// Core algorithm exports
pub mod dimensions;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use dimensions::{Dimension, DimensionKind};
pub use matcher::{Matcher, RankOutcome};
pub use scoring::{calculate_similarity, compute_match, score_dimension};
