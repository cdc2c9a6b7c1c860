//! Command line interface of the `tpr-dashboard` binary

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tpr_server::{
	EnvSource, OverrideSource, Settings, SettingsBuilder, SettingsError, TomlFileSource,
};

/// Settings file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tpr.toml";

/// Serve the TPR dashboard
#[derive(Debug, Parser)]
#[command(name = "tpr-dashboard")]
#[command(about = "Sidebar-navigated dashboard for trade policy review data", long_about = None)]
#[command(version)]
pub struct Cli {
	/// Enable debug logging
	#[arg(long)]
	pub debug: bool,

	/// TOML settings file (defaults to ./tpr.toml when present)
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// CSV dataset to load
	#[arg(short, long, value_name = "FILE")]
	pub data: Option<PathBuf>,

	/// Address to listen on
	#[arg(short, long, value_name = "ADDR")]
	pub bind: Option<SocketAddr>,
}

impl Cli {
	/// Flags that were given, as the highest priority settings source
	pub fn overrides(&self) -> OverrideSource {
		let mut overrides = OverrideSource::new();
		if self.debug {
			overrides = overrides.set("debug", true);
		}
		if let Some(data) = &self.data {
			overrides = overrides.set("data_path", data.to_string_lossy().into_owned());
		}
		if let Some(bind) = self.bind {
			overrides = overrides.set("bind", bind.to_string());
		}
		overrides
	}

	/// Merges defaults, the settings file, `TPR_*` variables and flags
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] if an explicitly named file is missing or any
	/// source holds an invalid value.
	pub fn settings(&self) -> Result<Settings, SettingsError> {
		self.settings_with(EnvSource::new())
	}

	/// Like [`settings`](Self::settings) with a fixed environment
	///
	/// # Errors
	///
	/// See [`settings`](Self::settings).
	pub fn settings_with(&self, env: EnvSource) -> Result<Settings, SettingsError> {
		let file = match &self.config {
			Some(path) => TomlFileSource::required(path),
			None => TomlFileSource::optional(DEFAULT_CONFIG_FILE),
		};
		SettingsBuilder::new()
			.add_source(file)
			.add_source(env)
			.add_source(self.overrides())
			.build()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;
	use tpr_server::ConfigSource;

	#[rstest]
	fn test_flags_override_file_and_env() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "data_path = \"from-file.csv\"\ntitle = \"File\"").unwrap();
		let path = file.path().to_string_lossy().into_owned();

		let cli = Cli::parse_from([
			"tpr-dashboard",
			"--config",
			path.as_str(),
			"--data",
			"from-flag.csv",
			"--bind",
			"0.0.0.0:8080",
		]);
		let settings = cli
			.settings_with(EnvSource::from_vars([("TPR_TITLE", "Env"), ("TPR_DEBUG", "1")]))
			.unwrap();

		assert_eq!(settings.data_path, PathBuf::from("from-flag.csv"));
		assert_eq!(settings.bind.to_string(), "0.0.0.0:8080");
		assert_eq!(settings.title, "Env");
		assert!(settings.debug);
	}

	#[rstest]
	fn test_missing_explicit_config_fails() {
		let cli = Cli::parse_from(["tpr-dashboard", "--config", "/nonexistent/tpr.toml"]);
		let result = cli.settings_with(EnvSource::from_vars(Vec::<(String, String)>::new()));
		assert!(matches!(result, Err(SettingsError::Read { .. })));
	}

	#[rstest]
	fn test_no_flags_means_no_overrides() {
		let cli = Cli::parse_from(["tpr-dashboard"]);
		assert!(cli.overrides().is_empty());

		let values = Cli::parse_from(["tpr-dashboard", "--debug"]).overrides().load().unwrap();
		assert_eq!(values.get("debug"), Some(&serde_json::Value::Bool(true)));
	}
}
