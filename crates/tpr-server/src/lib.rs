//! HTTP server for the TPR dashboard
//!
//! This crate wires the page renderer to the network:
//!
//! - **Settings**: layered defaults, TOML file, `TPR_*` environment and
//!   command line overrides
//! - **Logging**: a `tracing` subscriber filtered by settings or `RUST_LOG`
//! - **State**: the dataset and catalogs, loaded once and shared read-only
//! - **Routing**: pages, assets, the layout description and the callback
//!   endpoint
//! - **Serving**: an HTTP/1 accept loop with graceful shutdown
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[SettingsBuilder] --> B[Settings]
//!     B --> C[AppState::load]
//!     B --> D[logging::init]
//!     C --> E[DashboardHandler]
//!     E --> F[HttpServer]
//!     G[ShutdownCoordinator] --> F
//! ```
//!
//! # Example
//!
//! ```rust
//! use tpr_server::{EnvSource, OverrideSource, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(EnvSource::from_vars(vec![("TPR_TITLE", "Trade Policy Reviews")]))
//!     .add_source(OverrideSource::new().set("debug", true))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.title, "Trade Policy Reviews");
//! assert!(settings.debug);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod handler;
pub mod logging;
pub mod server;
pub mod settings;
pub mod shutdown;
pub mod state;

// Re-exports for convenience
pub use error::{Result, ServerError, SettingsError};
pub use handler::{CALLBACK_PATH, DashboardHandler, HEALTH_PATH, Handler, LAYOUT_PATH, query_pairs};
pub use server::HttpServer;
pub use settings::{
	ConfigSource, DefaultSource, ENV_PREFIX, EnvSource, OverrideSource, Settings, SettingsBuilder,
	TomlFileSource,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal, spawn_signal_handler};
pub use state::AppState;

use std::sync::Arc;

/// Serves `state` on the configured address until a termination signal
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listen address cannot be bound.
pub async fn run(settings: &Settings, state: AppState) -> Result<()> {
	let coordinator = ShutdownCoordinator::new(settings.shutdown_grace());
	spawn_signal_handler(coordinator.clone());

	let server = HttpServer::new(Arc::new(DashboardHandler::new(state)));
	server.listen_with_shutdown(settings.bind, coordinator).await
}
