//! Error types for tpr-pages

use thiserror::Error;

/// Error raised while dispatching a callback request
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PageError {
	/// The request body is not a valid callback request
	#[error("Malformed callback request: {0}")]
	Malformed(#[from] serde_json::Error),

	/// No callback produces the requested output
	#[error("Unknown callback output: {0}")]
	UnknownOutput(String),

	/// A required input was not supplied
	#[error("Missing callback input: {0}")]
	MissingInput(String),

	/// An input or state value has the wrong shape
	#[error("Invalid value for {id}: {reason}")]
	InvalidValue {
		/// `<component>.<property>` of the offending value
		id: String,
		/// What was wrong with it
		reason: String,
	},
}

/// Result type for page operations
pub type Result<T> = std::result::Result<T, PageError>;
