//! HTTP client cache for optimized connection management
//!
//! Provides per-provider client instances with connection pooling and
//! keep-alive optimization.

use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use tokenlens_types::{ProviderError, ProviderResult, ProviderRuntimeConfig};

/// Configuration for creating optimized HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Base endpoint of the upstream service
	pub base_url: String,
	/// Provider identifier for cache differentiation
	pub provider_id: String,
	/// Hard transport-level request timeout
	pub request_timeout_ms: u64,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
	/// Additional headers (for auth, etc.)
	pub headers: Vec<(String, String)>,
}

impl From<&ProviderRuntimeConfig> for ClientConfig {
	fn from(config: &ProviderRuntimeConfig) -> Self {
		let mut headers = vec![
			("User-Agent".to_string(), "TokenLens/1.0".to_string()),
			("Accept".to_string(), "application/json".to_string()),
		];

		if let Some(extra) = &config.headers {
			for (key, value) in extra {
				headers.push((key.clone(), value.clone()));
			}
		}

		Self {
			base_url: config.endpoint.clone(),
			provider_id: config.provider_id.clone(),
			request_timeout_ms: config.request_timeout_ms,
			max_idle_per_host: 10,         // Default: 10 idle connections per host
			keep_alive_timeout_ms: 90_000, // Default: 90 seconds keep-alive
			headers,
		}
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients keyed by provider configuration,
/// with TTL-based expiry
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or build a pooled client for the given configuration
	pub fn get_client(&self, config: &ClientConfig) -> ProviderResult<Arc<Client>> {
		if let Some(cached) = self.clients.get(config) {
			if !cached.is_expired(self.ttl) {
				return Ok(Arc::clone(&cached.client));
			}
		}

		debug!(
			provider_id = %config.provider_id,
			"Building HTTP client for provider"
		);

		let client = Self::build_client(config)?;
		let cached = CachedClient::new(client);
		let handle = Arc::clone(&cached.client);
		self.clients.insert(config.clone(), cached);

		Ok(handle)
	}

	/// Drop expired entries; safe to call concurrently with reads
	pub fn purge_expired(&self) {
		self.clients.retain(|_, cached| !cached.is_expired(self.ttl));
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	fn build_client(config: &ClientConfig) -> ProviderResult<Client> {
		use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
		use std::str::FromStr;

		let mut headers = HeaderMap::new();
		for (key, value) in &config.headers {
			if let (Ok(name), Ok(value)) =
				(HeaderName::from_str(key), HeaderValue::from_str(value))
			{
				headers.insert(name, value);
			}
		}

		ClientBuilder::new()
			.default_headers(headers)
			.timeout(Duration::from_millis(config.request_timeout_ms))
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.build()
			.map_err(ProviderError::Http)
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}
