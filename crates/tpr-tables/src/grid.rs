//! Grid definition, client state and the filter → sort → paginate pipeline

use crate::column::{Column, GridColumn};
use crate::error::{GridError, Result};
use crate::pagination::Pagination;
use crate::query::{FilterExpr, format_filter_query, parse_filter_query};
use crate::sorting::{SortBy, SortDirection, SortMode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use tpr_data::{Row, Table};

/// Rows shown per page
pub const PAGE_SIZE: usize = 20;

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(PAGE_SIZE) {
	Some(size) => size,
	None => panic!("page size must be non-zero"),
};

/// Inline style applied to every body cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStyle {
	/// CSS `height`
	pub height: String,
	/// CSS `min-width`
	pub min_width: String,
	/// CSS `max-width`
	pub max_width: String,
	/// CSS `white-space`
	pub white_space: String,
}

impl Default for CellStyle {
	fn default() -> Self {
		Self {
			height: "auto".to_string(),
			min_width: "50px".to_string(),
			max_width: "180px".to_string(),
			white_space: "normal".to_string(),
		}
	}
}

impl CellStyle {
	/// Formats the style as a CSS declaration list
	pub fn to_css(&self) -> String {
		format!(
			"height: {}; min-width: {}; max-width: {}; white-space: {}",
			self.height, self.min_width, self.max_width, self.white_space
		)
	}
}

/// Static grid configuration
///
/// Grids are read-only: nothing is editable, selectable or deletable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
	id: String,
	page_size: NonZeroUsize,
	sort_mode: SortMode,
	style_cell: CellStyle,
}

impl Default for GridOptions {
	fn default() -> Self {
		Self {
			id: "tab".to_string(),
			page_size: DEFAULT_PAGE_SIZE,
			sort_mode: SortMode::Multi,
			style_cell: CellStyle::default(),
		}
	}
}

impl GridOptions {
	/// Sets the DOM id of the grid
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = id.into();
		self
	}

	/// Sets the number of rows per page
	///
	/// # Errors
	///
	/// Returns [`GridError::InvalidPageSize`] if `page_size` is zero.
	pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
		self.page_size = NonZeroUsize::new(page_size).ok_or(GridError::InvalidPageSize(page_size))?;
		Ok(self)
	}

	/// Sets how header clicks combine
	pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
		self.sort_mode = sort_mode;
		self
	}

	/// Sets the body cell style
	pub fn with_style_cell(mut self, style_cell: CellStyle) -> Self {
		self.style_cell = style_cell;
		self
	}

	/// DOM id of the grid
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Rows per page
	pub fn page_size(&self) -> usize {
		self.page_size.get()
	}

	/// Header click behaviour
	pub fn sort_mode(&self) -> SortMode {
		self.sort_mode
	}

	/// Body cell style
	pub fn style_cell(&self) -> &CellStyle {
		&self.style_cell
	}
}

/// Client-held grid state: sort keys, column filters and current page
///
/// The state travels with every request; the server keeps none of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
	/// Sort keys, most significant first
	#[serde(default)]
	pub sort_by: Vec<SortBy>,
	/// Raw filter expression per column id
	#[serde(default)]
	pub filters: IndexMap<String, String>,
	/// Zero-based page index
	#[serde(default)]
	pub page_current: usize,
}

impl GridState {
	/// Appends a sort key
	pub fn with_sort(mut self, column_id: impl Into<String>, direction: SortDirection) -> Self {
		self.sort_by.push(SortBy::new(column_id, direction));
		self
	}

	/// Sets a column filter expression
	pub fn with_filter(mut self, column_id: impl Into<String>, expression: impl Into<String>) -> Self {
		self.filters.insert(column_id.into(), expression.into());
		self
	}

	/// Sets the current page
	pub fn with_page(mut self, page_current: usize) -> Self {
		self.page_current = page_current;
		self
	}

	/// Combined filter query (`{Cat} contains x && {Year} > 2018`)
	pub fn filter_query(&self) -> String {
		format_filter_query(&self.filters)
	}

	/// Replaces all column filters from a combined filter query
	pub fn with_filter_query(mut self, query: &str) -> Self {
		self.filters = parse_filter_query(query);
		self
	}

	/// Reads the state from URL query pairs
	///
	/// Recognised keys are `sort`, `page` and `filter[<column>]`; everything
	/// else is ignored. An unparseable page falls back to the first page.
	pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
		let mut state = Self::default();
		for (key, value) in pairs {
			if key == "sort" {
				state.sort_by = SortBy::parse_list(value);
			} else if key == "page" {
				state.page_current = value.parse().unwrap_or(0);
			} else if let Some(column) = key.strip_prefix("filter[").and_then(|k| k.strip_suffix(']')) {
				if !value.trim().is_empty() {
					state.filters.insert(column.to_string(), value.clone());
				}
			}
		}
		state
	}

	/// Writes the state as URL query pairs, omitting defaults
	pub fn to_query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		if !self.sort_by.is_empty() {
			pairs.push(("sort".to_string(), SortBy::format_list(&self.sort_by)));
		}
		for (column, expression) in &self.filters {
			if !expression.trim().is_empty() {
				pairs.push((format!("filter[{}]", column), expression.clone()));
			}
		}
		if self.page_current > 0 {
			pairs.push(("page".to_string(), self.page_current.to_string()));
		}
		pairs
	}
}

/// A grid over one table
///
/// Columns are derived from the table's header list every time a grid is
/// built, so a grid never outlives a change of column set.
#[derive(Debug, Clone)]
pub struct DataGrid<'t> {
	table: &'t Table,
	columns: Vec<GridColumn>,
	options: GridOptions,
}

impl<'t> DataGrid<'t> {
	/// Creates a grid with default options
	pub fn new(table: &'t Table) -> Self {
		Self::with_options(table, GridOptions::default())
	}

	/// Creates a grid with explicit options
	pub fn with_options(table: &'t Table, options: GridOptions) -> Self {
		let columns = table.columns().iter().map(GridColumn::new).collect();
		Self {
			table,
			columns,
			options,
		}
	}

	/// Columns in display order
	pub fn columns(&self) -> &[GridColumn] {
		&self.columns
	}

	/// Grid options
	pub fn options(&self) -> &GridOptions {
		&self.options
	}

	/// Looks up a column by id
	///
	/// # Errors
	///
	/// Returns [`GridError::UnknownColumn`] if no column has this id.
	pub fn column(&self, id: &str) -> Result<&GridColumn> {
		self.columns
			.iter()
			.find(|c| c.id() == id)
			.ok_or_else(|| GridError::UnknownColumn(id.to_string()))
	}

	/// Runs the column filters, sort and pagination for `state`
	///
	/// Invalid filter expressions and filters or sort keys on unknown
	/// columns are reported in the view and otherwise ignored.
	pub fn view(&self, state: &GridState) -> GridView<'t> {
		let mut invalid = Vec::new();
		let mut active: Vec<(&GridColumn, FilterExpr)> = Vec::new();
		for (column_id, expression) in &state.filters {
			if expression.trim().is_empty() {
				continue;
			}
			let parsed = self
				.column(column_id)
				.and_then(|column| Ok((column, FilterExpr::parse(column_id, expression)?)));
			match parsed {
				Ok(filter) => active.push(filter),
				Err(err) => {
					tracing::debug!(column = %column_id, %err, "Ignoring column filter");
					invalid.push(err);
				}
			}
		}

		let mut rows: Vec<&'t Row> = self
			.table
			.rows()
			.iter()
			.filter(|row| active.iter().all(|(column, expr)| expr.matches(&column.value(row))))
			.collect();

		let sort_by: Vec<SortBy> = state
			.sort_by
			.iter()
			.filter(|key| self.column(&key.column_id).is_ok())
			.cloned()
			.collect();
		if !sort_by.is_empty() {
			let keyed: Vec<(&GridColumn, SortDirection)> = sort_by
				.iter()
				.filter_map(|key| {
					self.column(&key.column_id)
						.ok()
						.map(|column| (column, key.direction))
				})
				.collect();
			rows.sort_by(|a, b| {
				keyed
					.iter()
					.map(|(column, direction)| {
						direction.apply(column.value(a).sort_cmp(&column.value(b)))
					})
					.find(|ordering| *ordering != Ordering::Equal)
					.unwrap_or(Ordering::Equal)
			});
		}

		let mut pagination = Pagination::new(self.options.page_size, rows.len());
		pagination.set_page(state.page_current);

		let filters = state
			.filters
			.iter()
			.filter(|(_, expression)| !expression.trim().is_empty())
			.map(|(column, expression)| (column.clone(), expression.clone()))
			.collect();

		GridView {
			columns: self.columns.clone(),
			rows,
			pagination: pagination.clone(),
			invalid_filters: invalid,
			state: GridState {
				sort_by,
				filters,
				page_current: pagination.page_current,
			},
		}
	}

	/// A view with this grid's columns and no rows
	pub fn empty_view(&self) -> GridView<'t> {
		GridView {
			columns: self.columns.clone(),
			rows: Vec::new(),
			pagination: Pagination::new(self.options.page_size, 0),
			invalid_filters: Vec::new(),
			state: GridState::default(),
		}
	}
}

/// The result of running a grid pipeline
#[derive(Debug, Clone)]
pub struct GridView<'t> {
	columns: Vec<GridColumn>,
	rows: Vec<&'t Row>,
	pagination: Pagination,
	invalid_filters: Vec<GridError>,
	state: GridState,
}

impl<'t> GridView<'t> {
	/// Columns in display order
	pub fn columns(&self) -> &[GridColumn] {
		&self.columns
	}

	/// All rows that passed the column filters, in sorted order
	pub fn rows(&self) -> &[&'t Row] {
		&self.rows
	}

	/// Rows on the current page
	pub fn page_rows(&self) -> &[&'t Row] {
		&self.rows[self.pagination.range()]
	}

	/// Pagination after clamping the requested page
	pub fn pagination(&self) -> &Pagination {
		&self.pagination
	}

	/// Filter problems found while building the view
	pub fn invalid_filters(&self) -> &[GridError] {
		&self.invalid_filters
	}

	/// Returns true if the column's filter expression was rejected
	pub fn is_filter_invalid(&self, column_id: &str) -> bool {
		self.invalid_filters.iter().any(|err| match err {
			GridError::InvalidFilter { column, .. } => column == column_id,
			GridError::UnknownColumn(column) => column == column_id,
			_ => false,
		})
	}

	/// The effective state: known sort keys, non-empty filters, clamped page
	pub fn state(&self) -> &GridState {
		&self.state
	}
}
