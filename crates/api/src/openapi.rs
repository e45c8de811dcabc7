//! OpenAPI documentation (behind the `openapi` feature)

use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::providers::{
	ChainResponse, ChainsResponse, ProviderResponse, ProvidersResponse,
};
use tokenlens_types::search::response::{
	ProviderStatusEntry, SearchMetadata, SearchResponse, TokenResponse,
};
use tokenlens_types::{Chain, MergedToken, ProviderCallStatus};

#[derive(OpenApi)]
#[openapi(
	paths(
		crate::handlers::search::get_search,
		crate::handlers::health::health,
		crate::handlers::health::ready,
		crate::handlers::providers::get_providers,
		crate::handlers::providers::get_chains,
	),
	components(schemas(
		Chain,
		MergedToken,
		ProviderCallStatus,
		ProviderStatusEntry,
		SearchMetadata,
		SearchResponse,
		TokenResponse,
		ErrorResponse,
		ProviderResponse,
		ProvidersResponse,
		ChainResponse,
		ChainsResponse,
	)),
	tags(
		(name = "search", description = "Cross-chain token search"),
		(name = "providers", description = "Provider and chain discovery"),
		(name = "health", description = "Liveness and readiness probes")
	),
	info(
		title = "TokenLens Aggregator API",
		description = "Cross-chain token search aggregation service",
		version = env!("CARGO_PKG_VERSION")
	)
)]
pub struct ApiDoc;
