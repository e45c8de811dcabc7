//! Token-list adapter
//!
//! Fetches the hosted per-chain token list document and matches the
//! query locally over symbol and name. The decoded list is kept in a
//! private TTL cache per chain so repeated searches do not refetch the
//! whole document; the cache is only ever written with a fully decoded
//! list, never partial data.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use tokenlens_types::{
	CandidateToken, Chain, Provider, ProviderError, ProviderResult, ProviderRuntimeConfig,
	SearchQuery, TokenProvider,
};

use crate::client_cache::{ClientCache, ClientConfig};

const PROVIDER_ID: &str = "tokenlists-v1";
const DEFAULT_ENDPOINT: &str = "https://tokens.coingecko.com";
const LIST_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

const SUPPORTED_CHAINS: [Chain; 5] = [
	Chain::Ethereum,
	Chain::Bsc,
	Chain::Polygon,
	Chain::Arbitrum,
	Chain::Base,
];

/// Token-list document as served by the hosted registry
#[derive(Debug, Clone, Deserialize)]
struct TokenListDocument {
	tokens: Vec<TokenListEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenListEntry {
	chain_id: u64,
	address: String,
	symbol: String,
	name: String,
	decimals: u8,
	#[serde(rename = "logoURI")]
	logo_uri: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedList {
	tokens: Arc<Vec<TokenListEntry>>,
	fetched_at: Instant,
}

impl CachedList {
	fn is_expired(&self, ttl: Duration) -> bool {
		self.fetched_at.elapsed() > ttl
	}
}

/// Adapter over hosted per-chain token lists
#[derive(Debug)]
pub struct TokenListAdapter {
	info: Provider,
	clients: ClientCache,
	lists: DashMap<Chain, CachedList>,
	list_ttl: Duration,
}

impl TokenListAdapter {
	pub fn new(info: Provider) -> Self {
		Self {
			info,
			clients: ClientCache::new(),
			lists: DashMap::new(),
			list_ttl: LIST_CACHE_TTL,
		}
	}

	/// Create the default token-list adapter instance
	pub fn with_default_config() -> Self {
		Self::new(Provider::new(
			PROVIDER_ID,
			"Token Lists",
			Some("Hosted per-chain token list registry".to_string()),
			"1.0.0",
		))
	}

	/// Override the list-cache TTL (useful for tests)
	pub fn with_list_ttl(mut self, ttl: Duration) -> Self {
		self.list_ttl = ttl;
		self
	}

	fn list_url(endpoint: &str, chain: Chain) -> String {
		format!("{}/{}/all.json", endpoint.trim_end_matches('/'), chain.slug())
	}

	async fn load_list(
		&self,
		chain: Chain,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Arc<Vec<TokenListEntry>>> {
		if let Some(cached) = self.lists.get(&chain) {
			if !cached.is_expired(self.list_ttl) {
				return Ok(Arc::clone(&cached.tokens));
			}
		}

		let client = self.clients.get_client(&ClientConfig::from(config))?;
		let url = Self::list_url(&config.endpoint, chain);
		debug!(provider_id = PROVIDER_ID, %url, "Fetching token list");

		let response = client
			.get(&url)
			.send()
			.await
			.map_err(|e| ProviderError::from_request_error(e, config.timeout_ms))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ProviderError::from_status(
				status.as_u16(),
				format!("token list fetch for {}", chain),
			));
		}

		let document: TokenListDocument =
			response
				.json()
				.await
				.map_err(|e| ProviderError::ParseError {
					reason: format!("token list document: {}", e),
				})?;

		// Lists are multi-chain documents; keep only this chain's entries
		let tokens: Vec<TokenListEntry> = document
			.tokens
			.into_iter()
			.filter(|entry| entry.chain_id == chain.chain_id())
			.collect();

		let tokens = Arc::new(tokens);
		self.lists.insert(
			chain,
			CachedList {
				tokens: Arc::clone(&tokens),
				fetched_at: Instant::now(),
			},
		);

		Ok(tokens)
	}
}

fn matches_query(entry: &TokenListEntry, query: &SearchQuery) -> bool {
	let needle = query.as_str();
	entry.symbol.to_lowercase().contains(needle) || entry.name.to_lowercase().contains(needle)
}

#[async_trait]
impl TokenProvider for TokenListAdapter {
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

		let list = self.load_list(chain, config).await?;

		let candidates = list
			.iter()
			.filter(|entry| matches_query(entry, query))
			.map(|entry| {
				let mut candidate = CandidateToken::new(
					chain,
					entry.address.clone(),
					entry.symbol.clone(),
					entry.name.clone(),
					PROVIDER_ID,
				)
				.with_decimals(entry.decimals);
				if let Some(logo_uri) = &entry.logo_uri {
					candidate = candidate.with_logo_uri(logo_uri.clone());
				}
				candidate
			})
			.collect();

		Ok(candidates)
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		let client = self.clients.get_client(&ClientConfig::from(config))?;
		let url = Self::list_url(&config.endpoint, Chain::Ethereum);
		let response = client
			.head(&url)
			.send()
			.await
			.map_err(|e| ProviderError::from_request_error(e, config.timeout_ms))?;
		Ok(response.status().is_success())
	}
}
