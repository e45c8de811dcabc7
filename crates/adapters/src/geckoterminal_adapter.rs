//! GeckoTerminal adapter
//!
//! Per-network token search used to backfill logos and decimal
//! precision. GeckoTerminal uses its own network identifiers, so the
//! adapter maps chain slugs before building the request.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tokenlens_types::{
	CandidateToken, Chain, Provider, ProviderError, ProviderResult, ProviderRuntimeConfig,
	SearchQuery, TokenProvider,
};

use crate::client_cache::{ClientCache, ClientConfig};

const PROVIDER_ID: &str = "geckoterminal-v2";
const DEFAULT_ENDPOINT: &str = "https://api.geckoterminal.com";

const SUPPORTED_CHAINS: [Chain; 5] = [
	Chain::Ethereum,
	Chain::Bsc,
	Chain::Polygon,
	Chain::Arbitrum,
	Chain::Base,
];

/// GeckoTerminal network identifier for a chain
fn network_id(chain: Chain) -> &'static str {
	match chain {
		Chain::Ethereum => "eth",
		Chain::Bsc => "bsc",
		Chain::Polygon => "polygon_pos",
		Chain::Arbitrum => "arbitrum",
		Chain::Base => "base",
	}
}

#[derive(Debug, Clone, Deserialize)]
struct TokenSearchResponse {
	#[serde(default)]
	data: Vec<TokenData>,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenData {
	attributes: TokenAttributes,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenAttributes {
	address: String,
	name: String,
	symbol: String,
	decimals: Option<u8>,
	image_url: Option<String>,
}

/// Adapter over the GeckoTerminal token search API
#[derive(Debug)]
pub struct GeckoTerminalAdapter {
	info: Provider,
	clients: ClientCache,
}

impl GeckoTerminalAdapter {
	pub fn new(info: Provider) -> Self {
		Self {
			info,
			clients: ClientCache::new(),
		}
	}

	/// Create the default GeckoTerminal adapter instance
	pub fn with_default_config() -> Self {
		Self::new(Provider::new(
			PROVIDER_ID,
			"GeckoTerminal",
			Some("Token metadata and logo search".to_string()),
			"2.0.0",
		))
	}

	fn search_url(endpoint: &str, query: &SearchQuery, chain: Chain) -> String {
		format!(
			"{}/api/v2/search/tokens?query={}&network={}",
			endpoint.trim_end_matches('/'),
			crate::dexscreener_adapter::urlencode(query.as_str()),
			network_id(chain)
		)
	}
}

#[async_trait]
impl TokenProvider for GeckoTerminalAdapter {
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
		let url = Self::search_url(&config.endpoint, query, chain);
		debug!(provider_id = PROVIDER_ID, %chain, %url, "Searching tokens");

		let response = client
			.get(&url)
			.send()
			.await
			.map_err(|e| ProviderError::from_request_error(e, config.timeout_ms))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ProviderError::from_status(status.as_u16(), "token search"));
		}

		let body: TokenSearchResponse =
			response
				.json()
				.await
				.map_err(|e| ProviderError::ParseError {
					reason: format!("token search response: {}", e),
				})?;

		let candidates = body
			.data
			.into_iter()
			.map(|token| {
				let attributes = token.attributes;
				let mut candidate = CandidateToken::new(
					chain,
					attributes.address,
					attributes.symbol,
					attributes.name,
					PROVIDER_ID,
				);
				if let Some(decimals) = attributes.decimals {
					candidate = candidate.with_decimals(decimals);
				}
				if let Some(image_url) = attributes.image_url {
					candidate = candidate.with_logo_uri(image_url);
				}
				candidate
			})
			.collect();

		Ok(candidates)
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		let client = self.clients.get_client(&ClientConfig::from(config))?;
		let url = format!(
			"{}/api/v2/networks",
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
