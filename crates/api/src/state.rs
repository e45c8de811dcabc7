use std::sync::Arc;

use tokenlens_adapters::ProviderRegistry;
use tokenlens_service::AggregatorService;
use tokenlens_types::Chain;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<AggregatorService>,
	pub registry: Arc<ProviderRegistry>,
	/// Chains queried when a request names none
	pub default_chains: Arc<Vec<Chain>>,
}
