//! Builder configuration tests

use tokenlens_aggregator::config::ProviderSettings;
use tokenlens_aggregator::mocks::{fixtures, MockTokenProvider};
use tokenlens_aggregator::{AggregatorBuilder, Chain, Settings};

#[tokio::test]
async fn test_default_builder_starts_with_default_providers() {
	let (_router, state) = AggregatorBuilder::new().start().await.unwrap();

	assert_eq!(state.registry.len(), 3);
	assert!(state.registry.get("tokenlists-v1").is_some());
	assert_eq!(
		*state.default_chains,
		vec![Chain::Ethereum, Chain::Bsc, Chain::Polygon]
	);
}

#[tokio::test]
async fn test_custom_provider_replaces_defaults() {
	let builder = AggregatorBuilder::new().with_provider(Box::new(MockTokenProvider::new(
		"lists",
		vec![Chain::Ethereum],
		vec![fixtures::weth("lists")],
	)));

	let (_router, state) = builder.start().await.unwrap();
	assert_eq!(state.registry.len(), 1);
	assert!(state.registry.get("lists").is_some());
}

#[tokio::test]
async fn test_unknown_configured_provider_fails_startup() {
	let mut settings = Settings::default();
	settings
		.providers
		.insert("nonexistent-v1".to_string(), ProviderSettings::default());

	let result = AggregatorBuilder::new().with_settings(settings).start().await;
	let error = result.err().expect("startup must fail").to_string();
	assert!(error.contains("nonexistent-v1"));
}

#[tokio::test]
async fn test_invalid_timeouts_fail_startup() {
	let mut settings = Settings::default();
	settings.timeouts.global_ms = 50;

	let result = AggregatorBuilder::new().with_settings(settings).start().await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_disabled_provider_is_not_queried() {
	let mut settings = Settings::default();
	settings.providers.insert(
		"dexscreener-v1".to_string(),
		ProviderSettings {
			enabled: false,
			..ProviderSettings::default()
		},
	);

	let (_router, state) = AggregatorBuilder::new()
		.with_settings(settings)
		.start()
		.await
		.unwrap();

	let stats = state.aggregator_service.get_stats();
	assert_eq!(stats.registered_providers, 3);
	assert_eq!(stats.enabled_providers, 2);
}

#[tokio::test]
async fn test_duplicate_custom_provider_panics() {
	let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
		AggregatorBuilder::new()
			.with_provider(Box::new(MockTokenProvider::empty("dup")))
			.with_provider(Box::new(MockTokenProvider::empty("dup")))
	}));
	assert!(result.is_err());
}
