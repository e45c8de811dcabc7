//! Provider descriptor and runtime configuration models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::models::{CandidateToken, Chain};

/// Static descriptor of a provider adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Provider {
	/// Unique provider ID (e.g. "tokenlists-v1")
	pub provider_id: String,
	/// Human-readable name
	pub name: String,
	/// Optional description
	pub description: Option<String>,
	/// Adapter version
	pub version: String,
}

impl Provider {
	pub fn new(
		provider_id: impl Into<String>,
		name: impl Into<String>,
		description: Option<String>,
		version: impl Into<String>,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			name: name.into(),
			description,
			version: version.into(),
		}
	}
}

/// Per-provider runtime configuration resolved at startup from settings
/// and adapter defaults. Passed into every provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRuntimeConfig {
	pub provider_id: String,
	/// Base URL of the upstream service
	pub endpoint: String,
	/// Logical timeout for a single provider call, enforced by the
	/// coordinator
	pub timeout_ms: u64,
	/// Hard transport-level timeout applied to the HTTP client
	pub request_timeout_ms: u64,
	/// Additional headers (auth keys etc.)
	pub headers: Option<HashMap<String, String>>,
	/// Optional restriction of the chains this provider is queried for;
	/// `None` means every chain the adapter supports
	pub chains: Option<Vec<Chain>>,
}

impl ProviderRuntimeConfig {
	pub fn new(provider_id: impl Into<String>, endpoint: impl Into<String>) -> Self {
		Self {
			provider_id: provider_id.into(),
			endpoint: endpoint.into(),
			timeout_ms: crate::constants::limits::DEFAULT_PROVIDER_TIMEOUT_MS,
			request_timeout_ms: crate::constants::limits::MAX_PROVIDER_TIMEOUT_MS,
			headers: None,
			chains: None,
		}
	}

	/// Whether this configuration allows querying the given chain
	pub fn allows_chain(&self, chain: Chain) -> bool {
		match &self.chains {
			Some(chains) => chains.contains(&chain),
			None => true,
		}
	}
}

/// Outcome of a single (provider, chain) fan-out call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProviderCallStatus {
	#[serde(rename_all = "camelCase")]
	Success { results: usize, latency_ms: u64 },
	TimedOut,
	Failed { error: String },
}

impl ProviderCallStatus {
	pub fn is_success(&self) -> bool {
		matches!(self, ProviderCallStatus::Success { .. })
	}

	pub fn is_timed_out(&self) -> bool {
		matches!(self, ProviderCallStatus::TimedOut)
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, ProviderCallStatus::Failed { .. })
	}
}

/// Record of one (provider, chain) call collected by the coordinator:
/// the status entry plus whatever candidates the call produced.
#[derive(Debug, Clone)]
pub struct ProviderCall {
	pub provider_id: String,
	pub chain: Chain,
	/// Registry precedence of the provider (lower wins merges)
	pub precedence: usize,
	pub status: ProviderCallStatus,
	pub candidates: Vec<CandidateToken>,
}

impl ProviderCall {
	pub fn success(
		provider_id: impl Into<String>,
		chain: Chain,
		precedence: usize,
		candidates: Vec<CandidateToken>,
		latency_ms: u64,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			chain,
			precedence,
			status: ProviderCallStatus::Success {
				results: candidates.len(),
				latency_ms,
			},
			candidates,
		}
	}

	pub fn timed_out(provider_id: impl Into<String>, chain: Chain, precedence: usize) -> Self {
		Self {
			provider_id: provider_id.into(),
			chain,
			precedence,
			status: ProviderCallStatus::TimedOut,
			candidates: Vec::new(),
		}
	}

	pub fn failed(
		provider_id: impl Into<String>,
		chain: Chain,
		precedence: usize,
		error: impl Into<String>,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			chain,
			precedence,
			status: ProviderCallStatus::Failed {
				error: error.into(),
			},
			candidates: Vec::new(),
		}
	}
}
