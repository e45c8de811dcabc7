pub mod common;
pub mod health;
pub mod providers;
pub mod search;

pub use common::ErrorResponse;
pub use health::{health, ready};
pub use providers::{get_chains, get_providers};
pub use search::get_search;
