//! Shared domain models

pub mod chain;
pub mod token;

pub use chain::Chain;
pub use token::{AssetKey, CandidateToken, MergedToken};
