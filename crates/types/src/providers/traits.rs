//! Core provider trait for upstream token source implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Provider, ProviderResult, ProviderRuntimeConfig};
use crate::models::{CandidateToken, Chain};
use crate::search::SearchQuery;

/// Core trait for token provider implementations
///
/// A provider translates the normalized search query into one upstream
/// source's request format and maps the response into `CandidateToken`s.
/// Implementations must not mutate shared state; every call is
/// independent and safely retryable, and faults are reported as typed
/// `ProviderError`s rather than panics.
#[async_trait]
pub trait TokenProvider: Send + Sync + Debug {
	/// Get provider descriptor information.
	/// This is the only required metadata method; `id`/`name`/`version`
	/// default to fields of the descriptor.
	fn provider_info(&self) -> &Provider;

	/// Provider ID (for registration and config matching)
	fn id(&self) -> &str {
		&self.provider_info().provider_id
	}

	/// Human-readable provider name
	fn name(&self) -> &str {
		&self.provider_info().name
	}

	/// Adapter version
	fn version(&self) -> &str {
		&self.provider_info().version
	}

	/// Default upstream base URL, used when settings carry no override
	fn default_endpoint(&self) -> &str;

	/// Chains this adapter can serve
	fn supported_chains(&self) -> &[Chain];

	fn supports_chain(&self, chain: Chain) -> bool {
		self.supported_chains().contains(&chain)
	}

	/// Search the upstream source for tokens matching `query` on `chain`.
	///
	/// The returned candidates must all belong to `chain`. The call is
	/// additionally bounded by the coordinator's per-provider timeout;
	/// implementations should still honor `config.request_timeout_ms`
	/// at the transport level so connections never linger past the
	/// deadline by more than a small grace margin.
	async fn search_tokens(
		&self,
		query: &SearchQuery,
		chain: Chain,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Vec<CandidateToken>>;

	/// Health check against the upstream source
	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool>;
}
