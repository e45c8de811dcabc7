use axum::{extract::Query, extract::State, http::StatusCode, response::Json};
use tracing::info;

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use tokenlens_types::search::request::SearchParams;
use tokenlens_types::search::response::SearchResponse;

/// Search for tokens across chains
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results aggregated successfully", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "search"
))]
/// GET /api/v1/search - Aggregated token search
pub async fn get_search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
	// Validate the request; invalid input never reaches the pipeline
	let request = params.validate(&state.default_chains).map_err(|e| {
		(
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
		)
	})?;

	info!(
		query = %request.query,
		chains = request.chains.len(),
		"Processing search request"
	);

	let outcome = state.aggregator_service.search(request).await;
	let response = SearchResponse::from_outcome(outcome);

	info!(
		results = response.total_results,
		duration_ms = response.metadata.total_duration_ms,
		providers_queried = response.metadata.providers_queried,
		"Returning search response"
	);

	Ok(Json(response))
}
