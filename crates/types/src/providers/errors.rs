//! Error types for provider operations

use thiserror::Error;

use crate::models::Chain;

/// Provider operation errors.
///
/// Every upstream fault maps into one of these variants at the adapter
/// boundary; none of them is fatal to the overall search request. The
/// coordinator records them as per-provider status entries.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Upstream unavailable: {reason}")]
	UpstreamUnavailable { reason: String },

	#[error("Upstream rejected request (HTTP {status_code}): {reason}")]
	UpstreamRejected { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	ParseError { reason: String },

	#[error("Chain not supported: {chain} by provider {provider_id}")]
	ChainNotSupported { chain: Chain, provider_id: String },

	#[error("Configuration error: {reason}")]
	Config { reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl ProviderError {
	/// Map an upstream HTTP status into the failure taxonomy:
	/// 4xx means the request was rejected, 5xx means the upstream is
	/// unavailable.
	pub fn from_status(status_code: u16, reason: impl Into<String>) -> Self {
		let reason = reason.into();
		if (400..500).contains(&status_code) {
			Self::UpstreamRejected {
				status_code,
				reason,
			}
		} else {
			Self::UpstreamUnavailable {
				reason: format!("HTTP {}: {}", status_code, reason),
			}
		}
	}

	/// Classify a transport-level reqwest failure
	pub fn from_request_error(err: reqwest::Error, timeout_ms: u64) -> Self {
		if err.is_timeout() {
			Self::Timeout { timeout_ms }
		} else if err.is_connect() {
			Self::UpstreamUnavailable {
				reason: err.to_string(),
			}
		} else if let Some(status) = err.status() {
			Self::from_status(status.as_u16(), err.to_string())
		} else {
			Self::Http(err)
		}
	}

	/// Extract the upstream HTTP status code when the error carries one
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ProviderError::UpstreamRejected { status_code, .. } => Some(*status_code),
			ProviderError::Http(err) => err.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, ProviderError::Timeout { .. })
	}
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Registry-level errors
#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("Provider already registered: {provider_id}")]
	AlreadyRegistered { provider_id: String },

	#[error("Provider not registered: {provider_id}")]
	NotRegistered { provider_id: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_status_maps_4xx_to_rejected() {
		let error = ProviderError::from_status(422, "bad query");
		assert!(matches!(
			error,
			ProviderError::UpstreamRejected {
				status_code: 422,
				..
			}
		));
		assert_eq!(error.status_code(), Some(422));
	}

	#[test]
	fn test_from_status_maps_5xx_to_unavailable() {
		let error = ProviderError::from_status(503, "maintenance");
		assert!(matches!(error, ProviderError::UpstreamUnavailable { .. }));
		assert_eq!(error.status_code(), None);
		assert!(error.to_string().contains("503"));
	}

	#[test]
	fn test_timeout_classification() {
		let error = ProviderError::Timeout { timeout_ms: 2000 };
		assert!(error.is_timeout());
		assert!(error.to_string().contains("2000ms"));
	}
}
