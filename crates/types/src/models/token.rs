//! Token search result models

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::Chain;

/// A token reported by a single upstream provider, mapped into the
/// common result shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateToken {
	/// Chain the token lives on
	pub chain: Chain,
	/// Contract address as reported by the provider (casing preserved)
	pub address: String,
	/// Token symbol (e.g. "WETH", "USDC")
	pub symbol: String,
	/// Human-readable name (e.g. "Wrapped Ether")
	pub name: String,
	/// Decimal precision, when the provider knows it
	pub decimals: Option<u8>,
	/// Logo/image URL, when the provider supplies one
	pub logo_uri: Option<String>,
	/// Market-significance metric in USD (liquidity), used for ranking
	pub liquidity_usd: Option<f64>,
	/// Provenance: ID of the provider that produced this candidate
	pub source: String,
}

impl CandidateToken {
	pub fn new(
		chain: Chain,
		address: impl Into<String>,
		symbol: impl Into<String>,
		name: impl Into<String>,
		source: impl Into<String>,
	) -> Self {
		Self {
			chain,
			address: address.into(),
			symbol: symbol.into(),
			name: name.into(),
			decimals: None,
			logo_uri: None,
			liquidity_usd: None,
			source: source.into(),
		}
	}

	pub fn with_decimals(mut self, decimals: u8) -> Self {
		self.decimals = Some(decimals);
		self
	}

	pub fn with_logo_uri(mut self, logo_uri: impl Into<String>) -> Self {
		self.logo_uri = Some(logo_uri.into());
		self
	}

	pub fn with_liquidity_usd(mut self, liquidity_usd: f64) -> Self {
		self.liquidity_usd = Some(liquidity_usd);
		self
	}

	/// Grouping key identifying the underlying asset regardless of
	/// which provider reported it
	pub fn asset_key(&self) -> AssetKey {
		AssetKey::new(self.chain, &self.address)
	}
}

/// Key uniquely identifying an on-chain asset across providers.
///
/// Address normalization lower-cases the contract address so that
/// checksum-cased and lowercase reports of the same asset group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey {
	pub chain_id: u64,
	pub address: String,
}

impl AssetKey {
	pub fn new(chain: Chain, address: &str) -> Self {
		Self {
			chain_id: chain.chain_id(),
			address: address.trim().to_ascii_lowercase(),
		}
	}
}

/// A token after cross-provider deduplication and field merging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MergedToken {
	pub chain: Chain,
	/// Normalized (lowercase) contract address
	pub address: String,
	pub symbol: String,
	pub name: String,
	pub decimals: Option<u8>,
	pub logo_uri: Option<String>,
	pub liquidity_usd: Option<f64>,
	/// IDs of every provider that reported this asset, in precedence order
	pub sources: Vec<String>,
}

impl MergedToken {
	/// Seed a merged token from the highest-precedence candidate of a group
	pub fn from_candidate(candidate: CandidateToken) -> Self {
		let key = candidate.asset_key();
		Self {
			chain: candidate.chain,
			address: key.address,
			symbol: candidate.symbol,
			name: candidate.name,
			decimals: candidate.decimals,
			logo_uri: candidate.logo_uri,
			liquidity_usd: candidate.liquidity_usd,
			sources: vec![candidate.source],
		}
	}

	/// Fold a lower-precedence candidate for the same asset into this
	/// record: missing fields are backfilled, existing fields are kept.
	pub fn absorb(&mut self, candidate: CandidateToken) {
		if self.decimals.is_none() {
			self.decimals = candidate.decimals;
		}
		if self.logo_uri.is_none() {
			self.logo_uri = candidate.logo_uri;
		}
		if self.liquidity_usd.is_none() {
			self.liquidity_usd = candidate.liquidity_usd;
		}
		if !self.sources.contains(&candidate.source) {
			self.sources.push(candidate.source);
		}
	}

	pub fn asset_key(&self) -> AssetKey {
		AssetKey::new(self.chain, &self.address)
	}
}
