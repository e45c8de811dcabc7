use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	catch_panic::CatchPanicLayer,
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{get_chains, get_providers, get_search, health, ready};
use crate::security::add_security_headers;
use crate::state::AppState;
// State is applied at the application level using `.with_state(...)`.
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router() -> Router<AppState> {
	// Layers prepared first so they're in scope for all cfg paths
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(64 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());
	// An unexpected fault inside the pipeline surfaces as a generic
	// 500 JSON body, never as internal details on the wire
	let catch_panic = CatchPanicLayer::custom(|_err: Box<dyn std::any::Any + Send + 'static>| {
		let body = serde_json::json!({
			"error": "INTERNAL_ERROR",
			"message": "Unexpected internal fault",
			"timestamp": chrono::Utc::now().timestamp(),
		});
		axum::http::Response::builder()
			.status(StatusCode::INTERNAL_SERVER_ERROR)
			.header("content-type", "application/json")
			.body(axum::body::Body::from(body.to_string()))
			.expect("static response builds")
	});

	// Base router; the bare /search alias mirrors /api/v1/search
	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/ready", get(ready))
		.route("/ready/", get(ready))
		.route("/search", get(get_search))
		.route("/api/v1/search", get(get_search))
		.route("/api/v1/search/", get(get_search))
		.route("/api/v1/providers", get(get_providers))
		.route("/api/v1/providers/", get(get_providers))
		.route("/api/v1/chains", get(get_chains))
		.route("/api/v1/chains/", get(get_chains));

	// Conditionally add OpenAPI endpoints
	#[cfg(feature = "openapi")]
	let router = {
		// SwaggerUI automatically provides the OpenAPI JSON endpoint
		base_router
			.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
	};

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	// Apply common layers
	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit)
		.layer(catch_panic);

	add_security_headers(router)
}
