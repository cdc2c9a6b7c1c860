//! Trade policy review dataset for the TPR dashboard
//!
//! This crate owns everything the dashboard knows about its data:
//!
//! - **Records**: [`Row`] and [`Table`], an explicit schema with the two fixed
//!   columns `Cat` and `Country` plus an ordered map of extra columns
//! - **Loading**: [`load_csv`] reads the dataset once at startup
//! - **Catalogs**: the Topic and Country choice lists offered by the selectors
//! - **Filtering**: [`filter`], the substring filter behind the Topic and
//!   Country selectors
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[CSV file] --> B[loader]
//!     B --> C[Table]
//!     C --> D[filter]
//!     E[SelectionState] --> D
//!     F[Catalogs] --> E
//!     D --> G[filtered Table]
//! ```
//!
//! # Example
//!
//! ```rust
//! use tpr_data::{Row, Table, filter};
//!
//! let table = Table::from_rows(vec![
//!     Row::new("customs procedures", "BRA"),
//!     Row::new("mfn tariff", "BDI#KEN#RWA#TZA#UGA"),
//! ]);
//!
//! let filtered = filter(&table, "mfn tariff", "KEN").unwrap();
//! assert_eq!(filtered.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;

// Re-exports for convenience
pub use catalog::{COUNTRY_CATALOG, CatalogConfig, CatalogIssue, Catalogs, TOPIC_CATALOG};
pub use error::{DataError, InputError, Result};
pub use filter::{DEFAULT_COUNTRY, DEFAULT_TOPIC, SelectionState, filter, selector_value};
pub use loader::{load_csv, read_csv};
pub use record::{CAT_COLUMN, COUNTRY_COLUMN, Cell, Row, Table};
