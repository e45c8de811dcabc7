//! Relevance ranking and result truncation

use std::cmp::Ordering;

use tokenlens_types::{MergedToken, SearchQuery};

/// Match quality buckets, best first. Derived `Ord` follows declaration
/// order, so ascending sort puts exact matches at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
	/// Symbol equals the query (case-insensitive)
	Exact,
	/// Symbol or name starts with the query
	Prefix,
	/// Symbol or name contains the query
	Contains,
}

/// Classify how well a token matches the query; `None` means no match
/// at all and the token is excluded from the result set.
///
/// A prefix match is a symbol prefix or a word-boundary prefix within
/// the display name, so "eth" ranks "Wrapped Ether" as a prefix match
/// rather than a mere substring hit.
pub fn match_quality(token: &MergedToken, query: &SearchQuery) -> Option<MatchQuality> {
	let needle = query.as_str();
	let symbol = token.symbol.to_lowercase();
	let name = token.name.to_lowercase();

	if symbol == needle {
		Some(MatchQuality::Exact)
	} else if symbol.starts_with(needle)
		|| name.split_whitespace().any(|word| word.starts_with(needle))
	{
		Some(MatchQuality::Prefix)
	} else if symbol.contains(needle) || name.contains(needle) {
		Some(MatchQuality::Contains)
	} else {
		None
	}
}

/// Among equal match quality, deeper liquidity ranks higher and tokens
/// lacking the metric sort after those carrying it
fn compare_liquidity(a: Option<f64>, b: Option<f64>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

/// Order merged tokens by relevance and truncate to the result budget.
///
/// Sort keys: match quality, then liquidity, then the stable
/// `(chain_id, address)` key so identical inputs always produce
/// identical output. Truncation keeps the head of the ordered list and
/// never drops a higher-ranked entry in favor of a lower-ranked one.
pub fn rank_tokens(
	tokens: Vec<MergedToken>,
	query: &SearchQuery,
	max_results: usize,
) -> Vec<MergedToken> {
	let mut scored: Vec<(MatchQuality, MergedToken)> = tokens
		.into_iter()
		.filter_map(|token| match_quality(&token, query).map(|quality| (quality, token)))
		.collect();

	scored.sort_by(|(quality_a, token_a), (quality_b, token_b)| {
		quality_a
			.cmp(quality_b)
			.then_with(|| compare_liquidity(token_a.liquidity_usd, token_b.liquidity_usd))
			.then_with(|| token_a.asset_key().cmp(&token_b.asset_key()))
	});

	scored.truncate(max_results);
	scored.into_iter().map(|(_, token)| token).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokenlens_types::{CandidateToken, Chain};

	fn token(symbol: &str, name: &str, address: &str, liquidity: Option<f64>) -> MergedToken {
		let mut candidate =
			CandidateToken::new(Chain::Ethereum, address, symbol, name, "tokenlists-v1");
		if let Some(liquidity) = liquidity {
			candidate = candidate.with_liquidity_usd(liquidity);
		}
		MergedToken::from_candidate(candidate)
	}

	fn query(raw: &str) -> SearchQuery {
		SearchQuery::parse(raw).unwrap()
	}

	#[test]
	fn test_match_quality_buckets() {
		let q = query("eth");
		assert_eq!(
			match_quality(&token("ETH", "Ethereum", "0xa", None), &q),
			Some(MatchQuality::Exact)
		);
		assert_eq!(
			match_quality(&token("ETHG", "ETHGlobal", "0xb", None), &q),
			Some(MatchQuality::Prefix)
		);
		// Word-boundary prefix within the name counts as a prefix match
		assert_eq!(
			match_quality(&token("WETH", "Wrapped Ether", "0xc", None), &q),
			Some(MatchQuality::Prefix)
		);
		// Substring-only hit
		assert_eq!(
			match_quality(&token("SETH2", "Staked Coin", "0xe", None), &q),
			Some(MatchQuality::Contains)
		);
		assert_eq!(match_quality(&token("USDC", "USD Coin", "0xd", None), &q), None);
	}

	#[test]
	fn test_exact_outranks_prefix_outranks_contains() {
		let q = query("eth");
		let ranked = rank_tokens(
			vec![
				token("SETH2", "Staked Coin", "0xc", Some(9_000_000.0)),
				token("ETHG", "ETHGlobal", "0xb", Some(1_000_000.0)),
				token("ETH", "Ethereum", "0xa", None),
			],
			&q,
			10,
		);

		let symbols: Vec<&str> = ranked.iter().map(|t| t.symbol.as_str()).collect();
		assert_eq!(symbols, vec!["ETH", "ETHG", "SETH2"]);
	}

	#[test]
	fn test_liquidity_orders_weth_above_scam_within_prefix_tier() {
		let q = query("eth");
		let ranked = rank_tokens(
			vec![
				token("ETHG", "ETHGlobal", "0xb", Some(1_200.0)),
				token("WETH", "Wrapped Ether", "0xa", Some(250_000_000.0)),
			],
			&q,
			10,
		);

		let symbols: Vec<&str> = ranked.iter().map(|t| t.symbol.as_str()).collect();
		assert_eq!(symbols, vec!["WETH", "ETHG"]);
	}

	#[test]
	fn test_liquidity_breaks_quality_ties() {
		let q = query("usd");
		let ranked = rank_tokens(
			vec![
				token("USDT", "Tether USD", "0xb", Some(1_000.0)),
				token("USDC", "USD Coin", "0xa", Some(2_000.0)),
				token("USDD", "Decentralized USD", "0xc", None),
			],
			&q,
			10,
		);

		let symbols: Vec<&str> = ranked.iter().map(|t| t.symbol.as_str()).collect();
		// All prefix matches: deepest liquidity first, metric-less last
		assert_eq!(symbols, vec!["USDC", "USDT", "USDD"]);
	}

	#[test]
	fn test_stable_tie_break_on_asset_key() {
		let q = query("usd");
		let a = token("USDX", "USD X", "0xaaa", None);
		let b = token("USDY", "USD Y", "0xbbb", None);

		let ranked_one = rank_tokens(vec![b.clone(), a.clone()], &q, 10);
		let ranked_two = rank_tokens(vec![a, b], &q, 10);
		assert_eq!(ranked_one, ranked_two);
		assert_eq!(ranked_one[0].address, "0xaaa");
	}

	#[test]
	fn test_truncation_keeps_highest_ranked() {
		let q = query("usd");
		let ranked = rank_tokens(
			vec![
				token("USDA", "USD A", "0xa", Some(100.0)),
				token("USDB", "USD B", "0xb", Some(300.0)),
				token("USDC", "USD C", "0xc", Some(200.0)),
			],
			&q,
			2,
		);

		let symbols: Vec<&str> = ranked.iter().map(|t| t.symbol.as_str()).collect();
		assert_eq!(symbols, vec!["USDB", "USDC"]);
	}

	#[test]
	fn test_non_matching_tokens_are_excluded() {
		let q = query("pepe");
		let ranked = rank_tokens(vec![token("USDC", "USD Coin", "0xa", None)], &q, 10);
		assert!(ranked.is_empty());
	}
}
