use axum::{extract::State, response::Json};
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;
use tokenlens_types::Chain;

/// Provider descriptor in the API response
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
	pub provider_id: String,
	pub name: String,
	pub description: Option<String>,
	pub version: String,
	pub chains: Vec<Chain>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProvidersResponse {
	pub providers: Vec<ProviderResponse>,
	pub total: usize,
}

/// List registered providers
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/providers",
    responses((status = 200, description = "Registered providers", body = ProvidersResponse)),
    tag = "providers"
))]
/// GET /api/v1/providers - Registered providers in precedence order
pub async fn get_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
	let providers: Vec<ProviderResponse> = state
		.registry
		.all()
		.iter()
		.map(|provider| {
			let info = provider.provider_info();
			ProviderResponse {
				provider_id: info.provider_id.clone(),
				name: info.name.clone(),
				description: info.description.clone(),
				version: info.version.clone(),
				chains: provider.supported_chains().to_vec(),
			}
		})
		.collect();

	let total = providers.len();
	Json(ProvidersResponse { providers, total })
}

/// Chain descriptor in the API response
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
	pub chain: Chain,
	pub chain_id: u64,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChainsResponse {
	pub chains: Vec<ChainResponse>,
	pub total: usize,
}

/// List supported chains
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/chains",
    responses((status = 200, description = "Supported chains", body = ChainsResponse)),
    tag = "providers"
))]
/// GET /api/v1/chains - Supported chains
pub async fn get_chains() -> Json<ChainsResponse> {
	let chains: Vec<ChainResponse> = Chain::ALL
		.iter()
		.map(|&chain| ChainResponse {
			chain,
			chain_id: chain.chain_id(),
		})
		.collect();

	let total = chains.len();
	Json(ChainsResponse { chains, total })
}
