//! Layered settings
//!
//! Settings are merged from several sources, lowest priority first:
//!
//! 1. built-in defaults ([`DefaultSource`])
//! 2. an optional TOML file ([`TomlFileSource`])
//! 3. `TPR_*` environment variables ([`EnvSource`])
//! 4. command line overrides ([`OverrideSource`])
//!
//! Each source yields a flat map of top-level keys; a key from a higher
//! priority source replaces the whole value from a lower one.

use crate::error::SettingsError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tpr_data::CatalogConfig;

/// Prefix of the environment variables read by [`EnvSource`]
pub const ENV_PREFIX: &str = "TPR_";

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Listen address
	pub bind: SocketAddr,
	/// CSV dataset loaded at startup
	pub data_path: PathBuf,
	/// Verbose logging
	pub debug: bool,
	/// `tracing` filter directive; overrides `RUST_LOG` and `debug`
	pub log_filter: Option<String>,
	/// Seconds in-flight connections get to finish on shutdown
	pub shutdown_grace_secs: u64,
	/// Document and sidebar title
	pub title: String,
	/// Selector catalog overrides
	pub catalog: CatalogConfig,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind: SocketAddr::from(([127, 0, 0, 1], 8050)),
			data_path: PathBuf::from("tpr-data-20191011.csv"),
			debug: false,
			log_filter: None,
			shutdown_grace_secs: 30,
			title: "Reports".to_string(),
			catalog: CatalogConfig::default(),
		}
	}
}

impl Settings {
	/// Grace period granted to in-flight connections on shutdown
	pub fn shutdown_grace(&self) -> Duration {
		Duration::from_secs(self.shutdown_grace_secs)
	}
}

/// A source of settings values
pub trait ConfigSource: Send + Sync {
	/// Loads the values this source provides
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError>;

	/// Priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Human readable description for logs
	fn description(&self) -> String;
}

/// Built-in defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		match serde_json::to_value(Settings::default()).map_err(SettingsError::Invalid)? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Ok(IndexMap::new()),
		}
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Built-in defaults".to_string()
	}
}

/// TOML settings file
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// A file that is skipped when it does not exist
	pub fn optional(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// A file that must exist
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	/// Path of the file
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		if !self.required && !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
			path: self.path.clone(),
			source,
		})?;
		let table: toml::Table = toml::from_str(&content).map_err(|source| SettingsError::Toml {
			path: self.path.clone(),
			source,
		})?;

		match serde_json::to_value(&table).map_err(SettingsError::Invalid)? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Ok(IndexMap::new()),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// `TPR_*` environment variables
///
/// `TPR_BIND`, `TPR_DATA_PATH`, `TPR_DEBUG`, `TPR_LOG`,
/// `TPR_SHUTDOWN_GRACE_SECS` and `TPR_TITLE` are recognised; other variables
/// with the prefix are ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Reads the process environment
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads a fixed set of variables instead of the process environment
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn setting_key(var: &str) -> Option<&'static str> {
		match var.strip_prefix(ENV_PREFIX)? {
			"BIND" => Some("bind"),
			"DATA_PATH" => Some("data_path"),
			"DEBUG" => Some("debug"),
			"LOG" => Some("log_filter"),
			"SHUTDOWN_GRACE_SECS" => Some("shutdown_grace_secs"),
			"TITLE" => Some("title"),
			_ => None,
		}
	}

	fn parse(key: &str, value: String) -> Value {
		match key {
			"debug" => match value.trim().to_lowercase().as_str() {
				"true" | "1" | "yes" | "on" => Value::Bool(true),
				"false" | "0" | "no" | "off" | "" => Value::Bool(false),
				_ => Value::String(value),
			},
			"shutdown_grace_secs" => value
				.trim()
				.parse::<u64>()
				.map(Value::from)
				.unwrap_or(Value::String(value)),
			_ => Value::String(value),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut config = IndexMap::new();
		for (var, value) in vars {
			if let Some(key) = Self::setting_key(&var) {
				config.insert(key.to_string(), Self::parse(key, value));
			}
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", ENV_PREFIX)
	}
}

/// Explicit overrides, typically from command line flags
#[derive(Debug, Clone, Default)]
pub struct OverrideSource {
	values: IndexMap<String, Value>,
}

impl OverrideSource {
	/// Creates an empty override set
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides one key
	pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}

	/// Returns true if nothing is overridden
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl ConfigSource for OverrideSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		200
	}

	fn description(&self) -> String {
		"Command line".to_string()
	}
}

/// Merges sources into [`Settings`]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl SettingsBuilder {
	/// Creates a builder holding only the built-in defaults
	pub fn new() -> Self {
		Self {
			sources: vec![Box::new(DefaultSource)],
		}
	}

	/// Adds a source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merges every source by priority and deserializes the result
	///
	/// # Errors
	///
	/// Returns the first source error, or [`SettingsError::Invalid`] if the
	/// merged values do not form valid settings.
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = serde_json::Map::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(source = %source.description(), keys = values.len(), "Loaded settings source");
			merged.extend(values);
		}

		serde_json::from_value(Value::Object(merged)).map_err(SettingsError::Invalid)
	}
}
