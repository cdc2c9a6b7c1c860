//! Pages, components and callbacks for the TPR dashboard
//!
//! This crate renders everything the browser sees. Rendering is a pure
//! function of the loaded data and the state the client sends along with each
//! request; nothing here touches the network.
//!
//! # Pages
//!
//! | Path | Content |
//! |------|---------|
//! | `/`, `/page-1` | Topic and Country selectors above the data grid |
//! | `/page-2` | Charts placeholder |
//! | `/page-3` | Help placeholder |
//! | anything else | 404 block naming the path |
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[ClientState] --> B[Dashboard]
//!     B --> C[Document]
//!     C --> D[Sidebar]
//!     C --> E[ContentBlock]
//!     E --> F[ReportsPanel]
//!     F --> G[Dropdown]
//!     F --> H[table container]
//!     I[CallbackRequest] --> J[dispatch]
//!     J --> B
//! ```
//!
//! # Example
//!
//! ```rust
//! use tpr_data::{Catalogs, Row, Table};
//! use tpr_pages::{ClientState, Dashboard};
//!
//! let table = Table::from_rows(vec![Row::new("economic environment", "BRA")]);
//! let catalogs = Catalogs::default();
//! let dashboard = Dashboard::new(&table, &catalogs);
//!
//! let html = dashboard.render_document(&ClientState::new("/page-1"));
//! assert!(html.contains("id=\"table-container\""));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod callbacks;
pub mod client;
pub mod component;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod nav;
pub mod selectors;
pub mod sidebar;

// Re-exports for convenience
pub use callbacks::{CallbackOutput, CallbackRequest, CallbackResponse, CallbackValue, dispatch, dispatch_json};
pub use client::ClientState;
pub use component::Component;
pub use content::{ContentBlock, ReportsPanel, render_table_container};
pub use dashboard::{DEFAULT_TITLE, Dashboard};
pub use error::{PageError, Result};
pub use layout::{Asset, BOOTSTRAP_CSS, Document, asset};
pub use nav::{ActiveLinks, NavState, Page, active_links};
pub use selectors::Dropdown;
pub use sidebar::{CollapseState, Sidebar, toggle_collapse};
