//! Error types for tpr-server

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while assembling settings
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read
	#[error("failed to read settings file {path}: {source}")]
	Read {
		/// File that was requested
		path: PathBuf,
		/// Underlying I/O failure
		#[source]
		source: std::io::Error,
	},

	/// The settings file is not valid TOML
	#[error("invalid TOML in {path}: {source}")]
	Toml {
		/// File that failed to parse
		path: PathBuf,
		/// Parser error
		#[source]
		source: toml::de::Error,
	},

	/// The merged settings do not fit the settings schema
	#[error("invalid settings: {0}")]
	Invalid(#[source] serde_json::Error),
}

/// Error raised by the server
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ServerError {
	/// The listener could not bind
	#[error("failed to bind {addr}: {source}")]
	Bind {
		/// Requested address
		addr: SocketAddr,
		/// Underlying I/O failure
		#[source]
		source: std::io::Error,
	},

	/// I/O error
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A response could not be built
	#[error("HTTP error: {0}")]
	Http(#[from] http::Error),

	/// A JSON body could not be serialized
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The log subscriber could not be installed
	#[error("logging setup failed: {0}")]
	Logging(String),

	/// Settings error
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// Dataset error
	#[error(transparent)]
	Data(#[from] tpr_data::DataError),
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;
