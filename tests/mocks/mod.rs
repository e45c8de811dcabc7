//! Shared fixtures and helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use tokenlens_aggregator::mocks::MockTokenProvider;
use tokenlens_aggregator::{
	AggregatorBuilder, AggregatorOptions, AggregatorService, ProviderRegistry,
	ProviderRuntimeConfig, TokenProvider,
};
use tokio::task::JoinHandle;

/// Runtime config pointing a mock provider at a non-routable endpoint
pub fn mock_runtime_config(provider_id: &str) -> ProviderRuntimeConfig {
	ProviderRuntimeConfig::new(provider_id, "http://mock.invalid")
}

/// Build a registry plus matching runtime configs from mock providers,
/// preserving registration (= precedence) order
pub fn registry_with(
	providers: Vec<MockTokenProvider>,
) -> (Arc<ProviderRegistry>, HashMap<String, ProviderRuntimeConfig>) {
	let mut registry = ProviderRegistry::new();
	let mut configs = HashMap::new();

	for provider in providers {
		let config = mock_runtime_config(provider.id());
		configs.insert(provider.id().to_string(), config);
		registry.register(Box::new(provider)).expect("unique mock IDs");
	}

	(Arc::new(registry), configs)
}

/// Aggregator service over mock providers with the given fan-out budget
pub fn service_with(
	providers: Vec<MockTokenProvider>,
	options: AggregatorOptions,
) -> AggregatorService {
	let (registry, mut configs) = registry_with(providers);
	// Per-provider timeout follows the options unless a test overrode it
	for config in configs.values_mut() {
		config.timeout_ms = options.per_provider_timeout_ms;
	}
	AggregatorService::new(registry, configs, options)
}

/// Spawn a live HTTP server from the given builder on an ephemeral port
pub async fn spawn_server(
	builder: AggregatorBuilder,
) -> Result<(String, JoinHandle<()>), Box<dyn std::error::Error>> {
	let (app, _state) = builder.start().await?;

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;
	let base_url = format!("http://{}:{}", addr.ip(), addr.port());

	let handle = tokio::spawn(async move {
		// Ignore serve errors when the test aborts the task
		let _ = axum::serve(listener, app).await;
	});

	// Give the server time to start
	tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

	Ok((base_url, handle))
}
