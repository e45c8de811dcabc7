//! Validation errors for the search endpoint

use thiserror::Error;

/// Input-validation failures surfaced as 400 responses.
///
/// These are the only request-level errors the search endpoint produces:
/// upstream failures are reported through per-provider status entries
/// instead.
#[derive(Error, Debug, PartialEq)]
pub enum SearchValidationError {
	#[error("Missing required parameter: q")]
	MissingQuery,

	#[error("Query too short: {actual} characters (minimum: {min})")]
	QueryTooShort { actual: usize, min: usize },

	#[error("Query too long: {actual} characters (maximum: {max})")]
	QueryTooLong { actual: usize, max: usize },
}

pub type SearchValidationResult<T> = Result<T, SearchValidationError>;
