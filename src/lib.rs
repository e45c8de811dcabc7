//! TokenLens Aggregator Library
//!
//! A cross-chain token search aggregator: one search request fans out
//! to multiple upstream token/metadata providers, and the results are
//! normalized, deduplicated, ranked and returned with per-provider
//! status reporting.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types - the most commonly used types
pub use tokenlens_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AssetKey,
	CandidateToken,
	// Primary domain entities
	Chain,
	MergedToken,
	Provider,
	ProviderCallStatus,
	// Error types
	ProviderError,
	ProviderResult,
	ProviderRuntimeConfig,
	RegistryError,
	SearchOutcome,
	SearchParams,
	SearchQuery,
	SearchRequest,
	SearchResponse,
	SearchValidationError,
	// Provider trait
	TokenProvider,
};

// Service layer
pub use tokenlens_service::{AggregationStats, AggregatorOptions, AggregatorService};

// Adapters
pub use tokenlens_adapters::{
	DexScreenerAdapter, GeckoTerminalAdapter, ProviderRegistry, TokenListAdapter,
};

// API layer
pub use tokenlens_api::{create_router, AppState};

// Config
pub use tokenlens_config::{load_config, log_service_info, log_startup_complete, Settings};

// Module aliases for direct access to member crates
pub mod types {
	pub use tokenlens_types::*;
}

pub mod adapters {
	pub use tokenlens_adapters::*;
}

pub mod config {
	pub use tokenlens_config::*;
}

pub mod api {
	pub use tokenlens_api::*;
	pub mod routes {
		pub use tokenlens_api::{create_router, AppState};
	}
}

pub mod service {
	pub use tokenlens_service::*;
}

pub mod mocks;

// Re-export external dependencies for examples
pub use async_trait;

/// Builder pattern for configuring the aggregator
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	registry: Option<ProviderRegistry>,
}

impl AggregatorBuilder {
	/// Create a new aggregator builder with default providers
	pub fn new() -> Self {
		Self::default()
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Register a custom provider (uses the provider's own ID).
	///
	/// Registering any custom provider replaces the default adapter
	/// set; a builder with no custom providers starts with the
	/// defaults. Panics if registration fails (this is intentional for
	/// startup-time configuration errors).
	pub fn with_provider(mut self, provider: Box<dyn TokenProvider>) -> Self {
		let mut registry = self.registry.unwrap_or_default();
		registry.register(provider).expect(
			"Failed to register provider during startup - this is a fatal configuration error",
		);
		self.registry = Some(registry);
		self
	}

	/// Build per-provider runtime configurations from settings and
	/// adapter defaults. Providers disabled in settings get no entry
	/// and are therefore never queried.
	fn build_runtime_configs(
		registry: &ProviderRegistry,
		settings: &Settings,
	) -> HashMap<String, ProviderRuntimeConfig> {
		let mut configs = HashMap::new();

		for provider in registry.all() {
			let provider_id = provider.id().to_string();
			let overrides = settings.providers.get(&provider_id);

			if let Some(overrides) = overrides {
				if !overrides.enabled {
					info!("Provider {} is disabled by configuration", provider_id);
					continue;
				}
			}

			let endpoint = overrides
				.and_then(|o| o.endpoint.clone())
				.unwrap_or_else(|| provider.default_endpoint().to_string());
			let timeout_ms = overrides
				.and_then(|o| o.timeout_ms)
				.unwrap_or(settings.timeouts.per_provider_ms);
			let headers = overrides.and_then(|o| o.headers.clone());
			let chains = overrides.and_then(|o| {
				o.chains.as_ref().map(|slugs| {
					slugs
						.iter()
						.filter_map(|slug| Chain::from_slug(slug))
						.collect()
				})
			});

			configs.insert(
				provider_id.clone(),
				ProviderRuntimeConfig {
					provider_id,
					endpoint,
					timeout_ms,
					request_timeout_ms: settings.timeouts.request_ms,
					headers,
					chains,
				},
			);
		}

		configs
	}

	/// Start the aggregator and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;
		let default_chains = settings.default_chains()?;

		let registry = Arc::new(self.registry.unwrap_or_else(ProviderRegistry::with_defaults));

		// Settings entries referencing unregistered providers are a
		// startup error, not a silently ignored key
		for provider_id in settings.providers.keys() {
			if registry.get(provider_id).is_none() {
				return Err(format!(
					"Configuration references unknown provider '{}'",
					provider_id
				)
				.into());
			}
		}

		let configs = Self::build_runtime_configs(&registry, &settings);
		info!(
			"Successfully initialized with {} of {} provider(s) enabled",
			configs.len(),
			registry.len()
		);

		let aggregator_service = AggregatorService::new(
			Arc::clone(&registry),
			configs,
			AggregatorOptions {
				per_provider_timeout_ms: settings.timeouts.per_provider_ms,
				global_timeout_ms: settings.timeouts.global_ms,
				max_results: settings.search.max_results,
			},
		);
		aggregator_service
			.validate_providers()
			.map_err(|e| format!("Provider validation failed: {}", e))?;

		let app_state = AppState {
			aggregator_service: Arc::new(aggregator_service),
			registry,
			default_chains: Arc::new(default_chains),
		};

		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use tokenlens_config::LogFormat;

		// Create env filter using config level or environment variable
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		// Initialize tracing with the configuration
		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Start the complete server with all defaults and setup.
	/// This method handles everything needed to run the server, including:
	/// - Loading .env file
	/// - Loading configuration with defaults
	/// - Initializing tracing
	/// - Binding and serving the application
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		// Use provided settings or load from config with defaults
		let using_provided_settings = self.settings.is_some();
		let settings = if using_provided_settings {
			self.settings.take().unwrap()
		} else {
			load_config().unwrap_or_default()
		};

		// Initialize tracing with configuration-based settings
		self.init_tracing_from_settings(&settings)?;

		// Log comprehensive service startup information
		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);

		info!("🔧 Configuring TokenLens aggregator server");
		let enabled_overrides = settings.enabled_providers();
		if !enabled_overrides.is_empty() {
			info!("Provider overrides: {}", enabled_overrides.len());
			for (id, provider) in &enabled_overrides {
				info!(
					"  - {}: {} ({}ms timeout)",
					id,
					provider.endpoint.as_deref().unwrap_or("default endpoint"),
					provider
						.timeout_ms
						.unwrap_or(settings.timeouts.per_provider_ms)
				);
			}
		}

		// Parse bind address
		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		// Ensure we have proper configuration in the builder
		if self.settings.is_none() {
			self.settings = Some(settings.clone());
		}

		// Create the router using the builder pattern
		let (app, _) = self.start().await?;

		// Start the server
		let listener = tokio::net::TcpListener::bind(addr).await?;

		// Log startup completion with comprehensive information
		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  GET  /api/v1/search");
		info!("  GET  /api/v1/providers");
		info!("  GET  /api/v1/chains");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		// Apply global rate limiting based on settings at the make_service level
		let rate_cfg = &settings.environment.rate_limiting;
		if rate_cfg.enabled {
			use std::time::Duration;
			use tokenlens_types::constants::limits::RATE_LIMIT_WINDOW_SECONDS;
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					rate_cfg.requests_per_minute as u64,
					Duration::from_secs(RATE_LIMIT_WINDOW_SECONDS),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc).await?;
		} else {
			axum::serve(listener, app).await?;
		}

		Ok(())
	}
}
