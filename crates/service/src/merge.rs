//! Cross-provider deduplication and field merging

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tokenlens_types::{AssetKey, MergedToken, ProviderCall};

/// Collapse per-provider candidate lists into one merged set.
///
/// Grouping key is `(chain_id, normalized address)`: the same on-chain
/// asset always groups together regardless of which provider reported
/// it or how it cased the address. Candidates are folded in provider
/// precedence order, so the earliest-registered provider wins every
/// field conflict and later providers only backfill missing fields.
///
/// Output order is deterministic (sorted by asset key); the ranker
/// establishes the final relevance order.
pub fn merge_candidates(mut calls: Vec<ProviderCall>) -> Vec<MergedToken> {
	// Precedence first so higher-precedence candidates seed the groups;
	// chain as a tie-break keeps the fold order fully deterministic.
	calls.sort_by_key(|call| (call.precedence, call.chain));

	let mut groups: BTreeMap<AssetKey, MergedToken> = BTreeMap::new();
	for call in calls {
		for candidate in call.candidates {
			match groups.entry(candidate.asset_key()) {
				Entry::Occupied(mut group) => group.get_mut().absorb(candidate),
				Entry::Vacant(slot) => {
					slot.insert(MergedToken::from_candidate(candidate));
				},
			}
		}
	}

	groups.into_values().collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokenlens_types::{CandidateToken, Chain};

	fn call(
		provider_id: &str,
		precedence: usize,
		candidates: Vec<CandidateToken>,
	) -> ProviderCall {
		ProviderCall::success(provider_id, Chain::Ethereum, precedence, candidates, 10)
	}

	#[test]
	fn test_same_asset_across_providers_is_merged_once() {
		let calls = vec![
			call(
				"tokenlists-v1",
				0,
				vec![CandidateToken::new(
					Chain::Ethereum,
					"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
					"WETH",
					"Wrapped Ether",
					"tokenlists-v1",
				)
				.with_decimals(18)],
			),
			call(
				"dexscreener-v1",
				1,
				vec![CandidateToken::new(
					Chain::Ethereum,
					"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
					"WETH",
					"Wrapped Ether",
					"dexscreener-v1",
				)
				.with_liquidity_usd(5_000_000.0)],
			),
		];

		let merged = merge_candidates(calls);
		assert_eq!(merged.len(), 1);
		let token = &merged[0];
		assert_eq!(token.decimals, Some(18));
		assert_eq!(token.liquidity_usd, Some(5_000_000.0));
		assert_eq!(token.sources, vec!["tokenlists-v1", "dexscreener-v1"]);
	}

	#[test]
	fn test_conflicting_logo_resolved_by_precedence() {
		let first = call(
			"tokenlists-v1",
			0,
			vec![CandidateToken::new(Chain::Ethereum, "0xaaa", "ARB", "Arbitrum", "tokenlists-v1")
				.with_logo_uri("https://lists.example/arb.png")],
		);
		let second = call(
			"geckoterminal-v2",
			2,
			vec![CandidateToken::new(
				Chain::Ethereum,
				"0xAAA",
				"ARB",
				"Arbitrum",
				"geckoterminal-v2",
			)
			.with_logo_uri("https://gecko.example/arb.png")],
		);

		// Arrival order must not matter, only precedence
		let merged = merge_candidates(vec![second.clone(), first.clone()]);
		assert_eq!(
			merged[0].logo_uri.as_deref(),
			Some("https://lists.example/arb.png")
		);

		let merged_again = merge_candidates(vec![first, second]);
		assert_eq!(merged, merged_again);
	}

	#[test]
	fn test_same_address_on_different_chains_not_merged() {
		let calls = vec![
			ProviderCall::success(
				"tokenlists-v1",
				Chain::Ethereum,
				0,
				vec![CandidateToken::new(
					Chain::Ethereum,
					"0xabc",
					"USDC",
					"USD Coin",
					"tokenlists-v1",
				)],
				5,
			),
			ProviderCall::success(
				"tokenlists-v1",
				Chain::Polygon,
				0,
				vec![CandidateToken::new(
					Chain::Polygon,
					"0xabc",
					"USDC",
					"USD Coin",
					"tokenlists-v1",
				)],
				5,
			),
		];

		let merged = merge_candidates(calls);
		assert_eq!(merged.len(), 2);
	}

	#[test]
	fn test_merged_addresses_are_normalized() {
		let calls = vec![call(
			"tokenlists-v1",
			0,
			vec![CandidateToken::new(
				Chain::Ethereum,
				"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
				"WETH",
				"Wrapped Ether",
				"tokenlists-v1",
			)],
		)];

		let merged = merge_candidates(calls);
		assert_eq!(
			merged[0].address,
			"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
		);
	}
}
