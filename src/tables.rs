//! Sortable, filterable, paginated data grid

pub use tpr_tables::*;
