//! Configuration settings structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use tokenlens_types::constants::limits::{
	DEFAULT_GLOBAL_TIMEOUT_MS, DEFAULT_MAX_RESULTS, DEFAULT_PROVIDER_TIMEOUT_MS,
	DEFAULT_RATE_LIMIT_BURST_SIZE, DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE, MAX_GLOBAL_TIMEOUT_MS,
	MAX_MAX_RESULTS, MAX_PROVIDER_TIMEOUT_MS, MIN_PROVIDER_TIMEOUT_MS,
};
use tokenlens_types::Chain;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub providers: HashMap<String, ProviderSettings>,
	pub timeouts: TimeoutSettings,
	pub search: SearchSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Per-provider configuration override.
///
/// Keys in `Settings::providers` are provider IDs; a missing entry
/// means the registered adapter runs with its defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
	pub enabled: bool,
	/// Override of the adapter's default endpoint
	pub endpoint: Option<String>,
	/// Override of the per-provider timeout
	pub timeout_ms: Option<u64>,
	/// Extra headers (API keys etc.)
	pub headers: Option<HashMap<String, String>>,
	/// Restrict the chains this provider is queried for (slugs)
	pub chains: Option<Vec<String>>,
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			endpoint: None,
			timeout_ms: None,
			headers: None,
			chains: None,
		}
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Per-provider timeout in milliseconds (1000-3000ms recommended)
	pub per_provider_ms: u64,
	/// Global fan-out timeout in milliseconds (3000-5000ms recommended)
	pub global_ms: u64,
	/// Hard transport-level timeout for HTTP clients
	pub request_ms: u64,
}

/// Search behavior configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchSettings {
	/// Result budget: the response never carries more entries than this
	pub max_results: usize,
	/// Chain slugs queried when the request names none
	pub default_chains: Vec<String>,
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
	pub burst_size: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			providers: HashMap::new(),
			timeouts: TimeoutSettings {
				per_provider_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
				global_ms: DEFAULT_GLOBAL_TIMEOUT_MS,
				request_ms: 5_000,
			},
			search: SearchSettings {
				max_results: DEFAULT_MAX_RESULTS,
				default_chains: vec![
					"ethereum".to_string(),
					"bsc".to_string(),
					"polygon".to_string(),
				],
			},
			environment: EnvironmentSettings {
				profile: EnvironmentProfile::Development,
				debug: true,
				rate_limiting: RateLimitSettings {
					enabled: false,
					requests_per_minute: DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE,
					burst_size: DEFAULT_RATE_LIMIT_BURST_SIZE,
				},
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

/// Settings validation failures, reported at startup
#[derive(Error, Debug)]
pub enum SettingsError {
	#[error("Invalid timeout configuration: {reason}")]
	InvalidTimeouts { reason: String },

	#[error("Invalid search configuration: {reason}")]
	InvalidSearch { reason: String },

	#[error("Unknown chain slug '{slug}' in {context}")]
	UnknownChain { slug: String, context: String },
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled provider overrides only
	pub fn enabled_providers(&self) -> HashMap<String, ProviderSettings> {
		self.providers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Check if debug mode is enabled
	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Resolve the configured default chain set.
	///
	/// Unlike request-time chain parsing, a typo here is a startup
	/// error rather than a silent drop.
	pub fn default_chains(&self) -> Result<Vec<Chain>, SettingsError> {
		self.search
			.default_chains
			.iter()
			.map(|slug| {
				Chain::from_slug(slug).ok_or_else(|| SettingsError::UnknownChain {
					slug: slug.clone(),
					context: "search.default_chains".to_string(),
				})
			})
			.collect()
	}

	/// Validate timeout and search bounds
	pub fn validate(&self) -> Result<(), SettingsError> {
		let timeouts = &self.timeouts;
		if timeouts.per_provider_ms < MIN_PROVIDER_TIMEOUT_MS
			|| timeouts.per_provider_ms > MAX_PROVIDER_TIMEOUT_MS
		{
			return Err(SettingsError::InvalidTimeouts {
				reason: format!(
					"per_provider_ms {}ms outside {}..{}ms",
					timeouts.per_provider_ms, MIN_PROVIDER_TIMEOUT_MS, MAX_PROVIDER_TIMEOUT_MS
				),
			});
		}
		if timeouts.global_ms < timeouts.per_provider_ms {
			return Err(SettingsError::InvalidTimeouts {
				reason: format!(
					"global_ms ({}ms) must not be less than per_provider_ms ({}ms)",
					timeouts.global_ms, timeouts.per_provider_ms
				),
			});
		}
		if timeouts.global_ms > MAX_GLOBAL_TIMEOUT_MS {
			return Err(SettingsError::InvalidTimeouts {
				reason: format!(
					"global_ms {}ms is too high (maximum: {}ms)",
					timeouts.global_ms, MAX_GLOBAL_TIMEOUT_MS
				),
			});
		}

		if self.search.max_results == 0 || self.search.max_results > MAX_MAX_RESULTS {
			return Err(SettingsError::InvalidSearch {
				reason: format!(
					"max_results {} outside 1..{}",
					self.search.max_results, MAX_MAX_RESULTS
				),
			});
		}

		// Provider chain restrictions must name known chains
		for (provider_id, provider) in &self.providers {
			if let Some(chains) = &provider.chains {
				for slug in chains {
					if Chain::from_slug(slug).is_none() {
						return Err(SettingsError::UnknownChain {
							slug: slug.clone(),
							context: format!("providers.{}.chains", provider_id),
						});
					}
				}
			}
		}

		self.default_chains()?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let settings = Settings::default();
		assert!(settings.validate().is_ok());
		assert_eq!(
			settings.default_chains().unwrap(),
			vec![Chain::Ethereum, Chain::Bsc, Chain::Polygon]
		);
		assert_eq!(settings.bind_address(), "0.0.0.0:3000");
	}

	#[test]
	fn test_global_timeout_must_cover_per_provider() {
		let mut settings = Settings::default();
		settings.timeouts.global_ms = 500;
		settings.timeouts.per_provider_ms = 2_000;
		assert!(matches!(
			settings.validate(),
			Err(SettingsError::InvalidTimeouts { .. })
		));
	}

	#[test]
	fn test_unknown_default_chain_rejected() {
		let mut settings = Settings::default();
		settings.search.default_chains = vec!["solana".to_string()];
		assert!(matches!(
			settings.validate(),
			Err(SettingsError::UnknownChain { .. })
		));
	}

	#[test]
	fn test_enabled_providers_filters_disabled() {
		let mut settings = Settings::default();
		settings.providers.insert(
			"dexscreener-v1".to_string(),
			ProviderSettings {
				enabled: false,
				..ProviderSettings::default()
			},
		);
		settings.providers.insert(
			"tokenlists-v1".to_string(),
			ProviderSettings::default(),
		);

		let enabled = settings.enabled_providers();
		assert_eq!(enabled.len(), 1);
		assert!(enabled.contains_key("tokenlists-v1"));
	}

	#[test]
	fn test_zero_max_results_rejected() {
		let mut settings = Settings::default();
		settings.search.max_results = 0;
		assert!(matches!(
			settings.validate(),
			Err(SettingsError::InvalidSearch { .. })
		));
	}
}
