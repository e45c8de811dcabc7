//! End-to-end tests starting a live HTTP server

mod mocks;

use std::sync::atomic::Ordering;

use mocks::spawn_server;
use reqwest::Client;
use tokenlens_aggregator::mocks::{fixtures, MockTokenProvider};
use tokenlens_aggregator::{AggregatorBuilder, Chain};

#[tokio::test]
async fn test_health_endpoint() {
	let (base_url, handle) = spawn_server(AggregatorBuilder::new())
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/health", base_url))
		.await
		.expect("Failed to get health endpoint");

	assert_eq!(response.status(), 200);
	assert_eq!(response.text().await.unwrap(), "OK");

	handle.abort();
}

#[tokio::test]
async fn test_search_rejects_missing_query() {
	let (base_url, handle) = spawn_server(AggregatorBuilder::new())
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/api/v1/search", base_url))
		.await
		.expect("Failed to get search endpoint");

	assert_eq!(response.status(), 400);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["error"], "VALIDATION_ERROR");
	assert!(json["message"].as_str().unwrap().contains("q"));

	handle.abort();
}

#[tokio::test]
async fn test_search_rejects_short_query_without_invoking_pipeline() {
	let provider = MockTokenProvider::new(
		"lists",
		vec![Chain::Ethereum],
		vec![fixtures::weth("lists")],
	);
	let counter = provider.call_counter();

	let builder = AggregatorBuilder::new().with_provider(Box::new(provider));
	let (base_url, handle) = spawn_server(builder).await.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/api/v1/search?q=e", base_url))
		.await
		.expect("Failed to get search endpoint");

	assert_eq!(response.status(), 400);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["error"], "VALIDATION_ERROR");

	// The provider was never called
	assert_eq!(counter.load(Ordering::SeqCst), 0);

	handle.abort();
}

#[tokio::test]
async fn test_search_happy_path_over_mock_providers() {
	let builder = AggregatorBuilder::new()
		.with_provider(Box::new(MockTokenProvider::new(
			"lists",
			vec![Chain::Ethereum],
			vec![fixtures::weth("lists"), fixtures::usdc_ethereum("lists")],
		)))
		.with_provider(Box::new(MockTokenProvider::new(
			"market",
			vec![Chain::Ethereum],
			vec![fixtures::weth("market")],
		)));
	let (base_url, handle) = spawn_server(builder).await.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.get(format!("{}/api/v1/search", base_url))
		.query(&[("q", "WETH"), ("chains", "ethereum")])
		.send()
		.await
		.expect("Failed to get search endpoint");

	assert_eq!(response.status(), 200);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");

	assert_eq!(json["success"], true);
	assert_eq!(json["query"], "weth");
	assert_eq!(json["chains"][0], "ethereum");
	assert_eq!(json["totalResults"], 1);

	// Both providers reported the same asset; it appears once with
	// merged provenance
	let result = &json["results"][0];
	assert_eq!(result["symbol"], "WETH");
	assert_eq!(result["chainId"], 1);
	assert_eq!(
		result["address"],
		"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
	);
	assert_eq!(result["sources"][0], "lists");
	assert_eq!(result["sources"][1], "market");

	// Status map covers both providers
	let metadata = &json["metadata"];
	assert_eq!(metadata["providersQueried"], 2);
	assert_eq!(metadata["providersSucceeded"], 2);

	handle.abort();
}

#[tokio::test]
async fn test_search_unknown_chains_yield_empty_result() {
	let provider = MockTokenProvider::new(
		"lists",
		vec![Chain::Ethereum],
		vec![fixtures::weth("lists")],
	);
	let counter = provider.call_counter();

	let builder = AggregatorBuilder::new().with_provider(Box::new(provider));
	let (base_url, handle) = spawn_server(builder).await.expect("Failed to start server");

	let response = reqwest::get(&format!(
		"{}/api/v1/search?q=weth&chains=solana,tron",
		base_url
	))
	.await
	.expect("Failed to get search endpoint");

	// Unrecognized chains are dropped silently: a well-formed empty
	// response, not an error, and no provider was invoked
	assert_eq!(response.status(), 200);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["success"], true);
	assert_eq!(json["totalResults"], 0);
	assert_eq!(json["metadata"]["providersQueried"], 0);
	assert_eq!(counter.load(Ordering::SeqCst), 0);

	handle.abort();
}

#[tokio::test]
async fn test_providers_endpoint_lists_defaults() {
	let (base_url, handle) = spawn_server(AggregatorBuilder::new())
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/api/v1/providers", base_url))
		.await
		.expect("Failed to get providers endpoint");

	assert_eq!(response.status(), 200);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["total"], 3);
	// Precedence order is the registration order of the defaults
	assert_eq!(json["providers"][0]["providerId"], "tokenlists-v1");
	assert_eq!(json["providers"][1]["providerId"], "dexscreener-v1");
	assert_eq!(json["providers"][2]["providerId"], "geckoterminal-v2");

	handle.abort();
}

#[tokio::test]
async fn test_chains_endpoint() {
	let (base_url, handle) = spawn_server(AggregatorBuilder::new())
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/api/v1/chains", base_url))
		.await
		.expect("Failed to get chains endpoint");

	assert_eq!(response.status(), 200);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["total"], 5);
	assert_eq!(json["chains"][0]["chain"], "ethereum");
	assert_eq!(json["chains"][0]["chainId"], 1);

	handle.abort();
}

#[tokio::test]
async fn test_search_alias_route() {
	let builder = AggregatorBuilder::new().with_provider(Box::new(MockTokenProvider::new(
		"lists",
		vec![Chain::Ethereum],
		vec![fixtures::usdc_ethereum("lists")],
	)));
	let (base_url, handle) = spawn_server(builder).await.expect("Failed to start server");

	// The bare /search path mirrors /api/v1/search
	let response = reqwest::get(&format!("{}/search?q=usdc&chains=ethereum", base_url))
		.await
		.expect("Failed to get search alias");

	assert_eq!(response.status(), 200);
	let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json["totalResults"], 1);

	handle.abort();
}
