//! Log subscriber setup

use crate::error::{Result, ServerError};
use crate::settings::Settings;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive used when neither `log_filter` nor `RUST_LOG` is set
pub fn default_directive(settings: &Settings) -> &'static str {
	if settings.debug {
		"tpr_dashboard=debug,tpr_server=debug,tpr_pages=debug,tpr_tables=debug,tpr_data=debug,info"
	} else {
		"info"
	}
}

/// Builds the event filter for `settings`
///
/// `log_filter` wins over `RUST_LOG`, which wins over the default for the
/// `debug` flag.
///
/// # Errors
///
/// Returns [`ServerError::Logging`] if `log_filter` is not a valid directive.
pub fn env_filter(settings: &Settings) -> Result<EnvFilter> {
	match &settings.log_filter {
		Some(directive) => EnvFilter::try_new(directive)
			.map_err(|err| ServerError::Logging(format!("invalid log filter {:?}: {}", directive, err))),
		None => Ok(EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new(default_directive(settings)))),
	}
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns [`ServerError::Logging`] if the filter is invalid or a subscriber
/// is already installed.
pub fn init(settings: &Settings) -> Result<()> {
	tracing_subscriber::registry()
		.with(env_filter(settings)?)
		.with(fmt::layer().with_target(true))
		.try_init()
		.map_err(|err| ServerError::Logging(err.to_string()))
}
