//! TPR dashboard server
//!
//! ## Usage
//!
//! ```bash
//! tpr-dashboard --data tpr-data-20191011.csv --bind 0.0.0.0:8050
//! TPR_DEBUG=1 tpr-dashboard --config tpr.toml
//! ```

use anyhow::Context;
use clap::Parser;
use tpr_dashboard::cli::Cli;
use tpr_server::{AppState, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let settings = cli.settings().context("failed to load settings")?;
	logging::init(&settings).context("failed to initialise logging")?;

	tracing::debug!(?settings, "Settings loaded");
	let state = AppState::load(&settings)
		.with_context(|| format!("failed to load dataset {}", settings.data_path.display()))?;

	tpr_server::run(&settings, state).await?;
	Ok(())
}
