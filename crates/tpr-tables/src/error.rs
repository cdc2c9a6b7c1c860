//! Error types for tpr-tables

use thiserror::Error;

/// Error type for grid operations
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
	/// A column was referenced that the grid does not have
	#[error("Unknown column: {0}")]
	UnknownColumn(String),

	/// Page size must be at least one row
	#[error("Invalid page size: {0}")]
	InvalidPageSize(usize),

	/// A column filter expression could not be parsed
	#[error("Invalid filter for column {column}: {expression:?}")]
	InvalidFilter {
		/// Column the expression was typed into
		column: String,
		/// Raw expression
		expression: String,
	},
}

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
