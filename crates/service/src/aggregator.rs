//! Core search aggregation logic
//!
//! One request triggers a bounded fan-out of concurrent, independent
//! provider calls. The coordinator is the single join point: every call
//! is bounded by its per-provider timeout, the whole fan-out by the
//! global deadline, and stragglers are abandoned rather than awaited.
//! Merging and ranking run synchronously after the join.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

use tokenlens_adapters::ProviderRegistry;
use tokenlens_types::constants::limits::{
	DEFAULT_GLOBAL_TIMEOUT_MS, DEFAULT_MAX_RESULTS, DEFAULT_PROVIDER_TIMEOUT_MS,
};
use tokenlens_types::{
	Chain, ProviderCall, ProviderCallOutcome, ProviderRuntimeConfig, SearchOutcome, SearchRequest,
	TokenProvider,
};

use crate::merge::merge_candidates;
use crate::rank::rank_tokens;

/// Fan-out budget and result cap for the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
	pub per_provider_timeout_ms: u64,
	pub global_timeout_ms: u64,
	pub max_results: usize,
}

impl Default for AggregatorOptions {
	fn default() -> Self {
		Self {
			per_provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			global_timeout_ms: DEFAULT_GLOBAL_TIMEOUT_MS,
			max_results: DEFAULT_MAX_RESULTS,
		}
	}
}

/// Service aggregating token search results from multiple providers
pub struct AggregatorService {
	registry: Arc<ProviderRegistry>,
	configs: HashMap<String, ProviderRuntimeConfig>,
	options: AggregatorOptions,
}

impl AggregatorService {
	/// Create a new aggregator service over pre-configured providers.
	///
	/// `configs` holds one runtime configuration per enabled provider;
	/// registered providers without an entry are not queried.
	pub fn new(
		registry: Arc<ProviderRegistry>,
		configs: HashMap<String, ProviderRuntimeConfig>,
		options: AggregatorOptions,
	) -> Self {
		Self {
			registry,
			configs,
			options,
		}
	}

	/// Validate that every configured provider has a registered adapter
	pub fn validate_providers(&self) -> Result<(), String> {
		for provider_id in self.configs.keys() {
			if self.registry.get(provider_id).is_none() {
				return Err(format!(
					"Configuration references unknown provider '{}'",
					provider_id
				));
			}
		}
		Ok(())
	}

	/// Resolve the (provider, chain) pairs applicable to a request,
	/// in registry precedence order
	fn resolve_pairs(
		&self,
		chains: &[Chain],
	) -> Vec<(Arc<dyn TokenProvider>, ProviderRuntimeConfig, Chain)> {
		let mut pairs = Vec::new();
		for provider in self.registry.all() {
			let Some(config) = self.configs.get(provider.id()) else {
				continue;
			};
			for &chain in chains {
				if provider.supports_chain(chain) && config.allows_chain(chain) {
					pairs.push((Arc::clone(provider), config.clone(), chain));
				}
			}
		}
		pairs
	}

	/// Run the full search pipeline: fan out, collect, merge, rank.
	///
	/// Provider faults never fail the request; they surface only in the
	/// per-provider status entries of the outcome. When every provider
	/// fails the outcome is a well-formed empty result set.
	pub async fn search(&self, request: SearchRequest) -> SearchOutcome {
		let started = Instant::now();
		let pairs = self.resolve_pairs(&request.chains);

		info!(
			query = %request.query,
			chains = request.chains.len(),
			providers = pairs.len(),
			"Fanning out token search"
		);

		let mut calls = if pairs.is_empty() {
			Vec::new()
		} else {
			self.fan_out(&request, pairs).await
		};

		// Status entries in precedence order for deterministic output
		calls.sort_by_key(|call| (call.precedence, call.chain));
		let statuses: Vec<ProviderCallOutcome> =
			calls.iter().map(ProviderCallOutcome::from).collect();

		let merged = merge_candidates(calls);
		let tokens = rank_tokens(merged, &request.query, self.options.max_results);

		let outcome = SearchOutcome {
			query: request.query.to_string(),
			chains: request.chains,
			tokens,
			statuses,
			total_duration_ms: started.elapsed().as_millis() as u64,
			per_provider_timeout_ms: self.options.per_provider_timeout_ms,
			global_timeout_ms: self.options.global_timeout_ms,
		};

		info!(
			results = outcome.tokens.len(),
			queried = outcome.providers_queried(),
			succeeded = outcome.providers_succeeded(),
			timed_out = outcome.providers_timed_out(),
			failed = outcome.providers_failed(),
			duration_ms = outcome.total_duration_ms,
			"Search aggregation completed"
		);

		outcome
	}

	/// Spawn one task per (provider, chain) pair and join them against
	/// the global deadline. Calls still outstanding at the deadline are
	/// aborted and recorded as timed out; their eventual results, if
	/// any, are discarded.
	async fn fan_out(
		&self,
		request: &SearchRequest,
		pairs: Vec<(Arc<dyn TokenProvider>, ProviderRuntimeConfig, Chain)>,
	) -> Vec<ProviderCall> {
		let handles: Vec<_> = pairs
			.into_iter()
			.map(|(provider, config, chain)| {
				let provider_id = provider.id().to_string();
				let precedence = self
					.registry
					.precedence(&provider_id)
					.unwrap_or(usize::MAX);
				let query = request.query.clone();
				let call_timeout_ms = config.timeout_ms;

				let task_provider_id = provider_id.clone();
				let handle = tokio::spawn(async move {
					debug!(provider_id = %task_provider_id, %chain, "Starting provider call");
					let call_started = Instant::now();

					let bounded = timeout(
						Duration::from_millis(call_timeout_ms),
						provider.search_tokens(&query, chain, &config),
					)
					.await;

					match bounded {
						Err(_) => {
							warn!(
								provider_id = %task_provider_id,
								%chain,
								timeout_ms = call_timeout_ms,
								"Provider call timed out"
							);
							ProviderCall::timed_out(task_provider_id, chain, precedence)
						},
						Ok(Err(error)) => {
							warn!(
								provider_id = %task_provider_id,
								%chain,
								%error,
								"Provider call failed"
							);
							ProviderCall::failed(task_provider_id, chain, precedence, error.to_string())
						},
						Ok(Ok(candidates)) => ProviderCall::success(
							task_provider_id,
							chain,
							precedence,
							candidates,
							call_started.elapsed().as_millis() as u64,
						),
					}
				});

				(provider_id, chain, precedence, handle)
			})
			.collect();

		let deadline = Instant::now() + Duration::from_millis(self.options.global_timeout_ms);
		let mut calls = Vec::with_capacity(handles.len());

		for (provider_id, chain, precedence, handle) in handles {
			let abort = handle.abort_handle();
			match timeout_at(deadline, handle).await {
				Ok(Ok(call)) => calls.push(call),
				Ok(Err(join_error)) => {
					warn!(
						provider_id = %provider_id,
						%chain,
						%join_error,
						"Provider task aborted unexpectedly"
					);
					calls.push(ProviderCall::failed(
						provider_id,
						chain,
						precedence,
						format!("provider task failed: {}", join_error),
					));
				},
				Err(_) => {
					abort.abort();
					warn!(
						provider_id = %provider_id,
						%chain,
						global_timeout_ms = self.options.global_timeout_ms,
						"Global deadline reached, abandoning provider call"
					);
					calls.push(ProviderCall::timed_out(provider_id, chain, precedence));
				},
			}
		}

		calls
	}

	/// Perform health checks on every configured provider concurrently
	pub async fn health_check_all(&self) -> HashMap<String, bool> {
		let checks = self.registry.all().iter().filter_map(|provider| {
			let config = self.configs.get(provider.id())?;
			let provider = Arc::clone(provider);
			let config = config.clone();
			Some(async move {
				let healthy = matches!(provider.health_check(&config).await, Ok(true));
				(provider.id().to_string(), healthy)
			})
		});

		join_all(checks).await.into_iter().collect()
	}

	/// Get aggregation statistics
	pub fn get_stats(&self) -> AggregationStats {
		AggregationStats {
			registered_providers: self.registry.len(),
			enabled_providers: self.configs.len(),
			global_timeout_ms: self.options.global_timeout_ms,
			max_results: self.options.max_results,
		}
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone)]
pub struct AggregationStats {
	pub registered_providers: usize,
	pub enabled_providers: usize,
	pub global_timeout_ms: u64,
	pub max_results: usize,
}
