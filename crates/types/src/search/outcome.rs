//! Domain-level search outcome produced by the aggregation pipeline

use crate::models::{Chain, MergedToken};
use crate::providers::{ProviderCallStatus, ProviderCall};

/// The result of one aggregation run: ranked merged tokens plus a
/// per-(provider, chain) status map so the caller can distinguish
/// "no matches" from "a source failed".
#[derive(Debug, Clone)]
pub struct SearchOutcome {
	pub query: String,
	pub chains: Vec<Chain>,
	pub tokens: Vec<MergedToken>,
	pub statuses: Vec<ProviderCallOutcome>,
	pub total_duration_ms: u64,
	pub per_provider_timeout_ms: u64,
	pub global_timeout_ms: u64,
}

/// Status entry for one (provider, chain) call
#[derive(Debug, Clone)]
pub struct ProviderCallOutcome {
	pub provider_id: String,
	pub chain: Chain,
	pub status: ProviderCallStatus,
}

impl From<&ProviderCall> for ProviderCallOutcome {
	fn from(call: &ProviderCall) -> Self {
		Self {
			provider_id: call.provider_id.clone(),
			chain: call.chain,
			status: call.status.clone(),
		}
	}
}

impl SearchOutcome {
	pub fn providers_queried(&self) -> usize {
		self.statuses.len()
	}

	pub fn providers_succeeded(&self) -> usize {
		self.statuses.iter().filter(|s| s.status.is_success()).count()
	}

	pub fn providers_timed_out(&self) -> usize {
		self.statuses
			.iter()
			.filter(|s| s.status.is_timed_out())
			.count()
	}

	pub fn providers_failed(&self) -> usize {
		self.statuses.iter().filter(|s| s.status.is_failed()).count()
	}

	/// True when at least one provider was queried and every one of
	/// them failed or timed out. Still a successful (empty) response at
	/// the HTTP boundary, never a server error.
	pub fn all_providers_failed(&self) -> bool {
		!self.statuses.is_empty() && self.providers_succeeded() == 0
	}
}
