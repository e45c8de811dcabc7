//! Search response models for the API layer

use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::outcome::SearchOutcome;
use crate::models::{Chain, MergedToken};
use crate::providers::ProviderCallStatus;

/// One ranked token in the API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
	/// Chain slug (e.g. "ethereum")
	pub chain: Chain,
	/// Numeric chain ID (e.g. 1)
	pub chain_id: u64,
	/// Normalized (lowercase) contract address
	pub address: String,
	pub symbol: String,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decimals: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logo_uri: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub liquidity_usd: Option<f64>,
	/// Providers that reported this asset, in precedence order
	pub sources: Vec<String>,
}

impl From<MergedToken> for TokenResponse {
	fn from(token: MergedToken) -> Self {
		Self {
			chain: token.chain,
			chain_id: token.chain.chain_id(),
			address: token.address,
			symbol: token.symbol,
			name: token.name,
			decimals: token.decimals,
			logo_uri: token.logo_uri,
			liquidity_usd: token.liquidity_usd,
			sources: token.sources,
		}
	}
}

/// Per-(provider, chain) status entry in the API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatusEntry {
	pub provider: String,
	pub chain: Chain,
	#[serde(flatten)]
	pub status: ProviderCallStatus,
}

/// Aggregation metadata reported alongside every search response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
	pub total_duration_ms: u64,
	pub per_provider_timeout_ms: u64,
	pub global_timeout_ms: u64,
	pub providers_queried: usize,
	pub providers_succeeded: usize,
	pub providers_timed_out: usize,
	pub providers_failed: usize,
	pub provider_statuses: Vec<ProviderStatusEntry>,
}

/// Response body of `GET /api/v1/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub success: bool,
	/// Echo of the normalized query
	pub query: String,
	/// Echo of the resolved chain set
	pub chains: Vec<Chain>,
	pub results: Vec<TokenResponse>,
	pub total_results: usize,
	pub timestamp: i64,
	pub metadata: SearchMetadata,
}

impl SearchResponse {
	/// Shape the API response from a domain outcome
	pub fn from_outcome(outcome: SearchOutcome) -> Self {
		let metadata = SearchMetadata {
			total_duration_ms: outcome.total_duration_ms,
			per_provider_timeout_ms: outcome.per_provider_timeout_ms,
			global_timeout_ms: outcome.global_timeout_ms,
			providers_queried: outcome.providers_queried(),
			providers_succeeded: outcome.providers_succeeded(),
			providers_timed_out: outcome.providers_timed_out(),
			providers_failed: outcome.providers_failed(),
			provider_statuses: outcome
				.statuses
				.iter()
				.map(|entry| ProviderStatusEntry {
					provider: entry.provider_id.clone(),
					chain: entry.chain,
					status: entry.status.clone(),
				})
				.collect(),
		};

		let results: Vec<TokenResponse> =
			outcome.tokens.into_iter().map(TokenResponse::from).collect();
		let total_results = results.len();

		Self {
			success: true,
			query: outcome.query,
			chains: outcome.chains,
			results,
			total_results,
			timestamp: Utc::now().timestamp(),
			metadata,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::CandidateToken;
	use crate::search::outcome::ProviderCallOutcome;

	#[test]
	fn test_from_outcome_counts_statuses() {
		let token = MergedToken::from_candidate(
			CandidateToken::new(Chain::Ethereum, "0xabc", "WETH", "Wrapped Ether", "tokenlists-v1")
				.with_decimals(18),
		);

		let outcome = SearchOutcome {
			query: "weth".to_string(),
			chains: vec![Chain::Ethereum],
			tokens: vec![token],
			statuses: vec![
				ProviderCallOutcome {
					provider_id: "tokenlists-v1".to_string(),
					chain: Chain::Ethereum,
					status: ProviderCallStatus::Success {
						results: 1,
						latency_ms: 12,
					},
				},
				ProviderCallOutcome {
					provider_id: "dexscreener-v1".to_string(),
					chain: Chain::Ethereum,
					status: ProviderCallStatus::TimedOut,
				},
			],
			total_duration_ms: 120,
			per_provider_timeout_ms: 2000,
			global_timeout_ms: 4000,
		};

		let response = SearchResponse::from_outcome(outcome);
		assert!(response.success);
		assert_eq!(response.total_results, 1);
		assert_eq!(response.metadata.providers_queried, 2);
		assert_eq!(response.metadata.providers_succeeded, 1);
		assert_eq!(response.metadata.providers_timed_out, 1);
		assert_eq!(response.metadata.providers_failed, 0);
		assert_eq!(response.results[0].chain_id, 1);
	}

	#[test]
	fn test_status_entry_wire_format() {
		let entry = ProviderStatusEntry {
			provider: "tokenlists-v1".to_string(),
			chain: Chain::Bsc,
			status: ProviderCallStatus::Success {
				results: 3,
				latency_ms: 45,
			},
		};

		let json = serde_json::to_value(&entry).unwrap();
		assert_eq!(json["provider"], "tokenlists-v1");
		assert_eq!(json["chain"], "bsc");
		assert_eq!(json["status"], "success");
		assert_eq!(json["results"], 3);
		assert_eq!(json["latencyMs"], 45);
	}
}
