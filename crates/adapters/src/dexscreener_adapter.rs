//! DexScreener adapter
//!
//! Uses the free-text pair search endpoint and maps the base token of
//! each returned pair into the common candidate shape. Pair search can
//! match on the quote side too, so results are re-filtered against the
//! query before being returned. This is the market-data source: it
//! carries pool liquidity but knows nothing about decimals.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

use tokenlens_types::{
	AssetKey, CandidateToken, Chain, Provider, ProviderError, ProviderResult,
	ProviderRuntimeConfig, SearchQuery, TokenProvider,
};

use crate::client_cache::{ClientCache, ClientConfig};

const PROVIDER_ID: &str = "dexscreener-v1";
const DEFAULT_ENDPOINT: &str = "https://api.dexscreener.com";

const SUPPORTED_CHAINS: [Chain; 5] = [
	Chain::Ethereum,
	Chain::Bsc,
	Chain::Polygon,
	Chain::Arbitrum,
	Chain::Base,
];

#[derive(Debug, Clone, Deserialize)]
struct PairSearchResponse {
	#[serde(default)]
	pairs: Vec<Pair>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pair {
	chain_id: String,
	base_token: PairToken,
	#[serde(default)]
	info: Option<PairInfo>,
	#[serde(default)]
	liquidity: Option<PairLiquidity>,
}

#[derive(Debug, Clone, Deserialize)]
struct PairToken {
	address: String,
	name: String,
	symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairInfo {
	image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PairLiquidity {
	usd: Option<f64>,
}

/// Adapter over the DexScreener pair search API
#[derive(Debug)]
pub struct DexScreenerAdapter {
	info: Provider,
	clients: ClientCache,
}

impl DexScreenerAdapter {
	pub fn new(info: Provider) -> Self {
		Self {
			info,
			clients: ClientCache::new(),
		}
	}

	/// Create the default DexScreener adapter instance
	pub fn with_default_config() -> Self {
		Self::new(Provider::new(
			PROVIDER_ID,
			"DexScreener",
			Some("DEX pair search with pool liquidity".to_string()),
			"1.0.0",
		))
	}

	fn search_url(endpoint: &str, query: &SearchQuery) -> String {
		format!(
			"{}/latest/dex/search?q={}",
			endpoint.trim_end_matches('/'),
			urlencode(query.as_str())
		)
	}
}

/// Minimal percent-encoding for query values
pub(crate) fn urlencode(raw: &str) -> String {
	let mut encoded = String::with_capacity(raw.len());
	for byte in raw.bytes() {
		match byte {
			b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
				encoded.push(byte as char)
			},
			b' ' => encoded.push_str("%20"),
			other => encoded.push_str(&format!("%{:02X}", other)),
		}
	}
	encoded
}

fn matches_query(token: &PairToken, query: &SearchQuery) -> bool {
	let needle = query.as_str();
	token.symbol.to_lowercase().contains(needle) || token.name.to_lowercase().contains(needle)
}

/// Collapse multiple pairs of the same base token into one candidate,
/// keeping the deepest pool's liquidity figure
fn collapse_pairs(pairs: Vec<Pair>, chain: Chain, query: &SearchQuery) -> Vec<CandidateToken> {
	let mut by_asset: HashMap<AssetKey, CandidateToken> = HashMap::new();

	for pair in pairs {
		if pair.chain_id != chain.slug() || !matches_query(&pair.base_token, query) {
			continue;
		}

		let liquidity_usd = pair.liquidity.and_then(|l| l.usd);
		let image_url = pair.info.and_then(|i| i.image_url);
		let key = AssetKey::new(chain, &pair.base_token.address);

		match by_asset.entry(key) {
			Entry::Occupied(mut slot) => {
				let existing = slot.get_mut();
				if let Some(liquidity) = liquidity_usd {
					if existing.liquidity_usd.is_none_or(|current| liquidity > current) {
						existing.liquidity_usd = Some(liquidity);
					}
				}
				if existing.logo_uri.is_none() {
					existing.logo_uri = image_url;
				}
			},
			Entry::Vacant(slot) => {
				let mut candidate = CandidateToken::new(
					chain,
					pair.base_token.address,
					pair.base_token.symbol,
					pair.base_token.name,
					PROVIDER_ID,
				);
				if let Some(liquidity) = liquidity_usd {
					candidate = candidate.with_liquidity_usd(liquidity);
				}
				if let Some(image_url) = image_url {
					candidate = candidate.with_logo_uri(image_url);
				}
				slot.insert(candidate);
			},
		}
	}

	let mut candidates: Vec<CandidateToken> = by_asset.into_values().collect();
	// Deterministic output regardless of map iteration order
	candidates.sort_by(|a, b| a.asset_key().cmp(&b.asset_key()));
	candidates
}

#[async_trait]
impl TokenProvider for DexScreenerAdapter {
	fn provider_info(&self) -> &Provider {
		&self.info
	}

	fn default_endpoint(&self) -> &str {
		DEFAULT_ENDPOINT
	}

	fn supported_chains(&self) -> &[Chain] {
		&SUPPORTED_CHAINS
	}

	async fn search_tokens(
		&self,
		query: &SearchQuery,
		chain: Chain,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Vec<CandidateToken>> {
		if !self.supports_chain(chain) {
			return Err(ProviderError::ChainNotSupported {
				chain,
				provider_id: PROVIDER_ID.to_string(),
			});
		}

		let client = self.clients.get_client(&ClientConfig::from(config))?;
		let url = Self::search_url(&config.endpoint, query);
		debug!(provider_id = PROVIDER_ID, %chain, %url, "Searching pairs");

		let response = client
			.get(&url)
			.send()
			.await
			.map_err(|e| ProviderError::from_request_error(e, config.timeout_ms))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ProviderError::from_status(status.as_u16(), "pair search"));
		}

		let body: PairSearchResponse =
			response
				.json()
				.await
				.map_err(|e| ProviderError::ParseError {
					reason: format!("pair search response: {}", e),
				})?;

		Ok(collapse_pairs(body.pairs, chain, query))
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		let client = self.clients.get_client(&ClientConfig::from(config))?;
		let url = format!(
			"{}/latest/dex/search?q=usdc",
			config.endpoint.trim_end_matches('/')
		);
		let response = client
			.get(&url)
			.send()
			.await
			.map_err(|e| ProviderError::from_request_error(e, config.timeout_ms))?;
		Ok(response.status().is_success())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pair(chain_id: &str, address: &str, symbol: &str, liquidity: Option<f64>) -> Pair {
		Pair {
			chain_id: chain_id.to_string(),
			base_token: PairToken {
				address: address.to_string(),
				name: format!("{} Token", symbol),
				symbol: symbol.to_string(),
			},
			info: None,
			liquidity: liquidity.map(|usd| PairLiquidity { usd: Some(usd) }),
		}
	}

	#[test]
	fn test_collapse_keeps_deepest_pool() {
		let query = SearchQuery::parse("weth").unwrap();
		let pairs = vec![
			pair("ethereum", "0xAAA", "WETH", Some(1_000.0)),
			pair("ethereum", "0xaaa", "WETH", Some(9_000.0)),
			pair("ethereum", "0xaaa", "WETH", Some(4_000.0)),
		];

		let candidates = collapse_pairs(pairs, Chain::Ethereum, &query);
		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].liquidity_usd, Some(9_000.0));
	}

	#[test]
	fn test_collapse_filters_other_chains_and_non_matches() {
		let query = SearchQuery::parse("weth").unwrap();
		let pairs = vec![
			pair("ethereum", "0xAAA", "WETH", Some(1_000.0)),
			pair("bsc", "0xBBB", "WETH", Some(2_000.0)),
			pair("ethereum", "0xCCC", "USDC", Some(3_000.0)),
		];

		let candidates = collapse_pairs(pairs, Chain::Ethereum, &query);
		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].address, "0xAAA");
		assert_eq!(candidates[0].source, "dexscreener-v1");
	}

	#[test]
	fn test_search_url_encodes_query() {
		let query = SearchQuery::parse("baby doge").unwrap();
		assert_eq!(
			DexScreenerAdapter::search_url("https://api.dexscreener.com", &query),
			"https://api.dexscreener.com/latest/dex/search?q=baby%20doge"
		);
	}

	#[test]
	fn test_pair_response_deserialization() {
		let json = r#"{
			"pairs": [{
				"chainId": "ethereum",
				"baseToken": {
					"address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
					"name": "Wrapped Ether",
					"symbol": "WETH"
				},
				"info": {"imageUrl": "https://img.example/weth.png"},
				"liquidity": {"usd": 12345.6}
			}]
		}"#;

		let body: PairSearchResponse = serde_json::from_str(json).unwrap();
		assert_eq!(body.pairs.len(), 1);
		assert_eq!(body.pairs[0].liquidity.as_ref().unwrap().usd, Some(12345.6));
	}
}
