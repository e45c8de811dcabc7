//! Search request model and validation

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "openapi")]
use utoipa::IntoParams;

use super::errors::{SearchValidationError, SearchValidationResult};
use crate::constants::limits::{MAX_QUERY_LEN, MIN_QUERY_LEN};
use crate::models::Chain;

/// A validated, normalized search query: trimmed, lower-cased, and at
/// least `MIN_QUERY_LEN` characters long. Queries shorter than that are
/// rejected before reaching the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
	/// Normalize and validate a raw query string
	pub fn parse(raw: &str) -> SearchValidationResult<Self> {
		let normalized = raw.trim().to_lowercase();
		let len = normalized.chars().count();
		if len < MIN_QUERY_LEN {
			return Err(SearchValidationError::QueryTooShort {
				actual: len,
				min: MIN_QUERY_LEN,
			});
		}
		if len > MAX_QUERY_LEN {
			return Err(SearchValidationError::QueryTooLong {
				actual: len,
				max: MAX_QUERY_LEN,
			});
		}
		Ok(Self(normalized))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SearchQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Raw query parameters of `GET /api/v1/search`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct SearchParams {
	/// Free-text query; required, minimum 2 characters after trimming
	pub q: Option<String>,
	/// Comma-separated chain slugs; defaults to the configured chain set
	pub chains: Option<String>,
}

impl SearchParams {
	/// Validate the raw parameters into a pipeline request.
	///
	/// `default_chains` is substituted when the `chains` parameter is
	/// absent. Unrecognized slugs in an explicit `chains` value are
	/// dropped silently; an explicit value with no recognizable slug
	/// resolves to an empty chain set (the pipeline then returns a
	/// well-formed empty result without querying any provider).
	pub fn validate(&self, default_chains: &[Chain]) -> SearchValidationResult<SearchRequest> {
		let raw = self.q.as_deref().ok_or(SearchValidationError::MissingQuery)?;
		let query = SearchQuery::parse(raw)?;

		let chains = match self.chains.as_deref() {
			None | Some("") => default_chains.to_vec(),
			Some(raw_chains) => Chain::parse_list(raw_chains),
		};

		Ok(SearchRequest { query, chains })
	}
}

/// A validated search request ready for the fan-out pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
	pub query: SearchQuery,
	pub chains: Vec<Chain>,
}
