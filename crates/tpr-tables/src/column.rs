//! Grid column definitions

use std::borrow::Cow;
use std::fmt::Debug;
use tpr_data::{Cell, Row};

/// Trait for grid column definitions
///
/// A column knows how to identify itself, how to label its header and how
/// to pull a value out of a row for display and sorting.
pub trait Column: Debug {
	/// Returns the identifier of this column
	///
	/// This is used as the key for sorting and filtering
	fn id(&self) -> &str;

	/// Returns the header text for this column
	fn name(&self) -> &str;

	/// Extracts the cell for the given row
	fn value<'r>(&self, row: &'r Row) -> Cow<'r, Cell>;

	/// Renders the cell for the given row as text
	fn render(&self, row: &Row) -> String {
		self.value(row).to_string()
	}

	/// Returns whether this column can be sorted
	///
	/// Default: true
	fn sortable(&self) -> bool {
		true
	}

	/// Returns whether this column can be filtered
	///
	/// Default: true
	fn filterable(&self) -> bool {
		true
	}

	/// Returns whether this column can be removed by the user
	///
	/// Default: false
	fn deletable(&self) -> bool {
		false
	}

	/// Returns whether this column can be selected by the user
	///
	/// Default: false
	fn selectable(&self) -> bool {
		false
	}
}

/// A column backed by one table header
///
/// The id and the displayed name are both the header text, and cells are
/// looked up by header. Missing values render as empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColumn {
	id: String,
	name: String,
}

impl GridColumn {
	/// Creates a column for a table header
	pub fn new(header: impl Into<String>) -> Self {
		let header = header.into();
		Self {
			id: header.clone(),
			name: header,
		}
	}
}

impl Column for GridColumn {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn value<'r>(&self, row: &'r Row) -> Cow<'r, Cell> {
		row.value(&self.id).unwrap_or(Cow::Owned(Cell::Empty))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_grid_column_creation() {
		let column = GridColumn::new("Cat");
		assert_eq!(column.id(), "Cat");
		assert_eq!(column.name(), "Cat");
		assert!(column.sortable());
		assert!(column.filterable());
		assert!(!column.deletable());
		assert!(!column.selectable());
	}

	#[test]
	fn test_grid_column_render() {
		let row = Row::new("mfn tariff", "KEN").with("Year", 2019);
		assert_eq!(GridColumn::new("Cat").render(&row), "mfn tariff");
		assert_eq!(GridColumn::new("Year").render(&row), "2019");
		assert_eq!(GridColumn::new("Missing").render(&row), "");
	}
}
