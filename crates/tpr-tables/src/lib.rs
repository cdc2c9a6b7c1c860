//! Data grid rendering for the TPR dashboard
//!
//! This crate turns a filtered [`tpr_data::Table`] into a paginated,
//! sortable, filterable HTML grid. The grid's column set always mirrors the
//! table it is given, so replacing the table replaces both rows and columns.
//!
//! # Features
//!
//! - **Columns**: one read-only column per table header
//! - **Sorting**: stable multi-column sorting, cycled by header clicks
//!   (`?sort=Cat,-Year`)
//! - **Column filtering**: typed per-column expressions such as
//!   `contains tariff` or `>= 2018` (`?filter[Year]=>= 2018`)
//! - **Pagination**: fixed page size, zero-based `?page=N`
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Table] --> B[DataGrid]
//!     C[GridState] --> B
//!     B --> D[column filters]
//!     D --> E[sort]
//!     E --> F[Pagination]
//!     F --> G[GridView]
//!     G --> H[render]
//! ```
//!
//! # Example
//!
//! ```rust
//! use tpr_data::{Row, Table};
//! use tpr_tables::{DataGrid, GridState};
//!
//! let table = Table::from_rows(vec![Row::new("wto", "BRA"), Row::new("wto", "ARG")]);
//! let grid = DataGrid::new(&table);
//! let state = GridState::default().with_sort("Country", tpr_tables::SortDirection::Ascending);
//!
//! let view = grid.view(&state);
//! assert_eq!(view.rows()[0].country(), "ARG");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod grid;
pub mod pagination;
pub mod query;
pub mod render;
pub mod sorting;

// Re-exports for convenience
pub use column::{Column, GridColumn};
pub use error::{GridError, Result};
pub use grid::{CellStyle, DataGrid, GridOptions, GridState, GridView, PAGE_SIZE};
pub use pagination::Pagination;
pub use query::{FilterExpr, FilterOperator};
pub use render::{GridLinks, render_grid, render_grid_error};
pub use sorting::{SortBy, SortDirection, SortMode};
