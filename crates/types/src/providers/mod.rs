//! Provider domain: trait, runtime configuration, and error taxonomy

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{ProviderError, ProviderResult, RegistryError};
pub use models::{Provider, ProviderCall, ProviderCallStatus, ProviderRuntimeConfig};
pub use traits::TokenProvider;
