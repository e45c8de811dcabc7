//! TokenLens Adapters
//!
//! Upstream-specific provider adapters for the TokenLens aggregator,
//! plus the ordered registry that holds them.

pub mod client_cache;
pub mod dexscreener_adapter;
pub mod geckoterminal_adapter;
pub mod tokenlist_adapter;

pub use client_cache::{ClientCache, ClientConfig};
pub use dexscreener_adapter::DexScreenerAdapter;
pub use geckoterminal_adapter::GeckoTerminalAdapter;
pub use tokenlist_adapter::TokenListAdapter;
pub use tokenlens_types::{ProviderError, ProviderResult, RegistryError, TokenProvider};

use std::collections::HashMap;
use std::sync::Arc;

use tokenlens_types::Chain;

/// Ordered registry of token providers.
///
/// Registration order is significant: it defines the merge precedence
/// used by the deduplicator (earlier-registered providers win field
/// conflicts). Absence of a provider for a chain is a first-class,
/// checked state, not an error.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
	providers: Vec<Arc<dyn TokenProvider>>,
	index: HashMap<String, usize>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self {
			providers: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Create a registry with the default adapters, in precedence order:
	/// token lists (authoritative metadata) first, then DexScreener
	/// (market data), then GeckoTerminal (logos and decimals backfill).
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry
			.register(Box::new(TokenListAdapter::with_default_config()))
			.expect("default adapter IDs are unique");
		registry
			.register(Box::new(DexScreenerAdapter::with_default_config()))
			.expect("default adapter IDs are unique");
		registry
			.register(Box::new(GeckoTerminalAdapter::with_default_config()))
			.expect("default adapter IDs are unique");
		registry
	}

	/// Register a provider at the end of the precedence order
	pub fn register(&mut self, provider: Box<dyn TokenProvider>) -> Result<(), RegistryError> {
		let provider_id = provider.id().to_string();
		if self.index.contains_key(&provider_id) {
			return Err(RegistryError::AlreadyRegistered { provider_id });
		}
		self.index.insert(provider_id, self.providers.len());
		self.providers.push(Arc::from(provider));
		Ok(())
	}

	pub fn get(&self, provider_id: &str) -> Option<&Arc<dyn TokenProvider>> {
		self.index
			.get(provider_id)
			.map(|&position| &self.providers[position])
	}

	/// Merge precedence of a provider (lower wins conflicts)
	pub fn precedence(&self, provider_id: &str) -> Option<usize> {
		self.index.get(provider_id).copied()
	}

	/// All registered providers, in precedence order
	pub fn all(&self) -> &[Arc<dyn TokenProvider>] {
		&self.providers
	}

	/// Providers able to serve the given chain, in precedence order
	pub fn providers_for_chain(&self, chain: Chain) -> Vec<Arc<dyn TokenProvider>> {
		self.providers
			.iter()
			.filter(|provider| provider.supports_chain(chain))
			.cloned()
			.collect()
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_defaults_precedence_order() {
		let registry = ProviderRegistry::with_defaults();
		assert_eq!(registry.len(), 3);
		assert_eq!(registry.precedence("tokenlists-v1"), Some(0));
		assert_eq!(registry.precedence("dexscreener-v1"), Some(1));
		assert_eq!(registry.precedence("geckoterminal-v2"), Some(2));
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let mut registry = ProviderRegistry::new();
		registry
			.register(Box::new(TokenListAdapter::with_default_config()))
			.unwrap();
		let result = registry.register(Box::new(TokenListAdapter::with_default_config()));
		assert!(matches!(
			result,
			Err(RegistryError::AlreadyRegistered { provider_id }) if provider_id == "tokenlists-v1"
		));
	}

	#[test]
	fn test_providers_for_chain() {
		let registry = ProviderRegistry::with_defaults();
		let providers = registry.providers_for_chain(Chain::Ethereum);
		assert_eq!(providers.len(), 3);
		// Precedence order is preserved
		assert_eq!(providers[0].id(), "tokenlists-v1");
	}

	#[test]
	fn test_get_unknown_provider() {
		let registry = ProviderRegistry::with_defaults();
		assert!(registry.get("unknown-v1").is_none());
		assert!(registry.precedence("unknown-v1").is_none());
	}
}
