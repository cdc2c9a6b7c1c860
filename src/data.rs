//! Dataset records, loading, catalogs and selector filtering
//!
//! This module provides access to `tpr-data`.
//!
//! ## Example
//!
//! ```rust
//! use tpr_dashboard::data::{Row, SelectionState, Table};
//!
//! let table = Table::from_rows(vec![Row::new("wto", "BRA"), Row::new("wto", "KEN")]);
//! let filtered = SelectionState::new("wto", "KEN").apply(&table).unwrap();
//! assert_eq!(filtered.len(), 1);
//! ```

pub use tpr_data::*;
