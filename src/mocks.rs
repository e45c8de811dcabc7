//! Mock providers for examples and testing
//!
//! This module provides simple, controllable mock providers that can be
//! used in examples and tests without network access. Latency, failure
//! mode and the returned candidate set are all configurable, and every
//! invocation is counted so tests can assert whether the pipeline was
//! reached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tokenlens_types::{
	CandidateToken, Chain, Provider, ProviderError, ProviderResult, ProviderRuntimeConfig,
	SearchQuery, TokenProvider,
};

/// Failure modes a mock provider can simulate
#[derive(Debug, Clone)]
pub enum MockFailure {
	/// Sleep for the configured delay and then report a timeout
	Timeout,
	/// Report the upstream as unavailable (connection refused / 5xx)
	Unavailable,
	/// Report the upstream as rejecting the query (4xx)
	Rejected,
	/// Report a malformed response
	Parse,
}

/// Configurable mock token provider
#[derive(Debug)]
pub struct MockTokenProvider {
	info: Provider,
	chains: Vec<Chain>,
	tokens: Vec<CandidateToken>,
	delay: Option<Duration>,
	failure: Option<MockFailure>,
	calls: Arc<AtomicUsize>,
	healthy: bool,
}

impl MockTokenProvider {
	/// Create a mock provider returning the given candidates on every
	/// supported chain
	pub fn new(id: &str, chains: Vec<Chain>, tokens: Vec<CandidateToken>) -> Self {
		Self {
			info: Provider::new(id, format!("Mock {}", id), None, "1.0.0"),
			chains,
			tokens,
			delay: None,
			failure: None,
			calls: Arc::new(AtomicUsize::new(0)),
			healthy: true,
		}
	}

	/// Mock provider serving every chain with no results
	pub fn empty(id: &str) -> Self {
		Self::new(id, Chain::ALL.to_vec(), Vec::new())
	}

	/// Delay every call by the given duration before responding
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Make every call fail with the given mode
	pub fn with_failure(mut self, failure: MockFailure) -> Self {
		self.failure = Some(failure);
		self
	}

	/// Make health checks report unhealthy
	pub fn unhealthy(mut self) -> Self {
		self.healthy = false;
		self
	}

	/// Handle for asserting how many times `search_tokens` ran
	pub fn call_counter(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.calls)
	}
}

#[async_trait]
impl TokenProvider for MockTokenProvider {
	fn provider_info(&self) -> &Provider {
		&self.info
	}

	fn default_endpoint(&self) -> &str {
		"http://mock.invalid"
	}

	fn supported_chains(&self) -> &[Chain] {
		&self.chains
	}

	async fn search_tokens(
		&self,
		query: &SearchQuery,
		chain: Chain,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Vec<CandidateToken>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}

		if let Some(failure) = &self.failure {
			return Err(match failure {
				MockFailure::Timeout => ProviderError::Timeout {
					timeout_ms: config.timeout_ms,
				},
				MockFailure::Unavailable => ProviderError::UpstreamUnavailable {
					reason: "connection refused".to_string(),
				},
				MockFailure::Rejected => ProviderError::UpstreamRejected {
					status_code: 400,
					reason: "bad query".to_string(),
				},
				MockFailure::Parse => ProviderError::ParseError {
					reason: "unexpected response shape".to_string(),
				},
			});
		}

		// Serve only this chain's candidates matching the query,
		// like a real upstream would
		let needle = query.as_str();
		Ok(self
			.tokens
			.iter()
			.filter(|token| token.chain == chain)
			.filter(|token| {
				token.symbol.to_lowercase().contains(needle)
					|| token.name.to_lowercase().contains(needle)
			})
			.cloned()
			.collect())
	}

	async fn health_check(&self, _config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		Ok(self.healthy)
	}
}

/// Common token fixtures used across tests and examples
pub mod fixtures {
	use super::*;

	pub fn weth(source: &str) -> CandidateToken {
		CandidateToken::new(
			Chain::Ethereum,
			"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
			"WETH",
			"Wrapped Ether",
			source,
		)
		.with_decimals(18)
		.with_liquidity_usd(250_000_000.0)
	}

	pub fn usdc_ethereum(source: &str) -> CandidateToken {
		CandidateToken::new(
			Chain::Ethereum,
			"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
			"USDC",
			"USD Coin",
			source,
		)
		.with_decimals(6)
		.with_liquidity_usd(400_000_000.0)
	}

	pub fn usdc_polygon(source: &str) -> CandidateToken {
		CandidateToken::new(
			Chain::Polygon,
			"0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174",
			"USDC",
			"USD Coin",
			source,
		)
		.with_decimals(6)
		.with_liquidity_usd(50_000_000.0)
	}

	pub fn ethglobal_scam(source: &str) -> CandidateToken {
		CandidateToken::new(
			Chain::Ethereum,
			"0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB",
			"ETHG",
			"ETHGlobal",
			source,
		)
		.with_decimals(18)
		.with_liquidity_usd(1_200.0)
	}
}
