//! Blockchain chain model

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Supported blockchain chain
///
/// Chains are identified on the wire by their lowercase slug
/// (e.g. `ethereum`, `bsc`) and internally carry the canonical
/// EVM chain ID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Chain {
	Ethereum,
	Bsc,
	Polygon,
	Arbitrum,
	Base,
}

impl Chain {
	/// All supported chains, in canonical order
	pub const ALL: [Chain; 5] = [
		Chain::Ethereum,
		Chain::Bsc,
		Chain::Polygon,
		Chain::Arbitrum,
		Chain::Base,
	];

	/// Canonical EVM chain ID (e.g. 1 for Ethereum mainnet, 137 for Polygon)
	pub fn chain_id(&self) -> u64 {
		match self {
			Chain::Ethereum => 1,
			Chain::Bsc => 56,
			Chain::Polygon => 137,
			Chain::Arbitrum => 42161,
			Chain::Base => 8453,
		}
	}

	/// Lowercase slug used in request and response payloads
	pub fn slug(&self) -> &'static str {
		match self {
			Chain::Ethereum => "ethereum",
			Chain::Bsc => "bsc",
			Chain::Polygon => "polygon",
			Chain::Arbitrum => "arbitrum",
			Chain::Base => "base",
		}
	}

	/// Resolve a slug to a chain. Matching is case-insensitive and
	/// ignores surrounding whitespace. Unknown slugs yield `None`.
	pub fn from_slug(slug: &str) -> Option<Chain> {
		match slug.trim().to_ascii_lowercase().as_str() {
			"ethereum" => Some(Chain::Ethereum),
			"bsc" => Some(Chain::Bsc),
			"polygon" => Some(Chain::Polygon),
			"arbitrum" => Some(Chain::Arbitrum),
			"base" => Some(Chain::Base),
			_ => None,
		}
	}

	/// Parse a comma-separated list of chain slugs.
	///
	/// Unrecognized slugs are dropped silently and duplicates are
	/// collapsed while preserving first-seen order. An input with no
	/// recognizable slug yields an empty list, not an error.
	pub fn parse_list(raw: &str) -> Vec<Chain> {
		let mut chains = Vec::new();
		for part in raw.split(',') {
			if let Some(chain) = Chain::from_slug(part) {
				if !chains.contains(&chain) {
					chains.push(chain);
				}
			}
		}
		chains
	}
}

impl fmt::Display for Chain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.slug())
	}
}
