//! TokenLens Types
//!
//! Shared models and traits for the TokenLens token search aggregator.
//! This crate contains all domain models organized by business entity.

pub mod constants;
pub mod models;
pub mod providers;
pub mod search;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export shared domain models
pub use models::{AssetKey, CandidateToken, Chain, MergedToken};

pub use providers::{
	Provider, ProviderCall, ProviderCallStatus, ProviderError, ProviderResult,
	ProviderRuntimeConfig, RegistryError, TokenProvider,
};

pub use search::{
	ProviderCallOutcome, SearchMetadata, SearchOutcome, SearchParams, SearchQuery, SearchRequest,
	SearchResponse, SearchValidationError, SearchValidationResult, TokenResponse,
};
