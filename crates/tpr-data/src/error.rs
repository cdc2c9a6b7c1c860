//! Error types for tpr-data

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading the dataset
///
/// Every variant is fatal at startup: the server refuses to serve traffic
/// without a complete table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DataError {
	/// The data file could not be opened
	#[error("failed to open data file {path}: {source}")]
	Open {
		/// Path that was requested
		path: PathBuf,
		/// Underlying I/O failure
		#[source]
		source: std::io::Error,
	},

	/// The CSV content is malformed
	#[error("malformed CSV data: {0}")]
	Csv(#[from] csv::Error),

	/// A required column is absent from the header row
	#[error("data file is missing required column `{0}`")]
	MissingColumn(String),
}

/// Error raised by the filtering engine on malformed input
///
/// The dashboard renders these inline above an empty table rather than
/// failing the page.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
	/// A selector delivered something other than a string
	#[error("selector `{selector}` must hold a string value, got {found}")]
	NonStringSelector {
		/// Selector identifier (e.g. `dropdown_1`)
		selector: String,
		/// JSON type that was received instead
		found: &'static str,
	},

	/// The table handed to the filter lacks a column the filter reads
	#[error("table is missing required column `{0}`")]
	MissingColumn(String),
}

/// Result type for dataset loading
pub type Result<T> = std::result::Result<T, DataError>;
