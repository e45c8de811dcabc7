//! TokenLens Configuration
//!
//! Configuration management and startup utilities for the TokenLens
//! aggregator.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	EnvironmentProfile, EnvironmentSettings, LogFormat, LoggingSettings, ProviderSettings,
	RateLimitSettings, SearchSettings, ServerSettings, Settings, SettingsError, TimeoutSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
