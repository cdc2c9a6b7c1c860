//! # TPR Dashboard
//!
//! A sidebar-navigated web dashboard for browsing trade policy review data.
//!
//! The dashboard loads one CSV dataset at startup and serves three pages. The
//! first narrows the dataset with a Topic and a Country selector and shows the
//! result in a sortable, filterable, paginated grid; the other two are
//! placeholders. A collapsible sidebar links the pages on narrow screens.
//!
//! Every page is rendered on the server. Interactive state travels in query
//! parameters, so the dashboard works without scripts; with scripts enabled,
//! selector changes and sidebar toggles go through the callback endpoint and
//! patch the page in place.
//!
//! ## Crates
//!
//! | Module | Crate | Purpose |
//! |--------|-------|---------|
//! | [`data`] | `tpr-data` | Records, CSV loading, catalogs, selector filtering |
//! | [`tables`] | `tpr-tables` | Grid sorting, column filters and pagination |
//! | [`pages`] | `tpr-pages` | Components, pages and callbacks |
//! | [`server`] | `tpr-server` | Settings, logging, routing and the HTTP server |
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A[data] --> B[tables]
//!     A --> C[pages]
//!     B --> C
//!     C --> D[server]
//!     D --> E[tpr-dashboard binary]
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use tpr_dashboard::prelude::*;
//!
//! let table = Table::from_rows(vec![Row::new("mfn tariff", "BDI#KEN#RWA#TZA#UGA")]);
//! let state = AppState::new(table, Catalogs::default());
//!
//! let client = ClientState::new("/page-1");
//! let html = state.dashboard().render_document(&client);
//! assert!(html.contains("id=\"sidebar\""));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod cli;
pub mod data;
pub mod pages;
pub mod server;
pub mod tables;

/// Commonly used types
pub mod prelude {
	pub use tpr_data::{Catalogs, Row, SelectionState, Table, load_csv};
	pub use tpr_pages::{ClientState, Dashboard};
	pub use tpr_server::{AppState, DashboardHandler, HttpServer, Settings, SettingsBuilder};
	pub use tpr_tables::{DataGrid, GridState};
}
