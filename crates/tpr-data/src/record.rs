//! Rows, cells and the in-memory table

use indexmap::IndexMap;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Header of the topic/category column
pub const CAT_COLUMN: &str = "Cat";

/// Header of the country code column
pub const COUNTRY_COLUMN: &str = "Country";

/// A single cell value carried through from the data file
///
/// Numeric cells keep the field exactly as written; the parsed value is only
/// used for ordering and comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
	/// Free text
	Text(String),
	/// Whole number
	Integer {
		/// Parsed value
		value: i64,
		/// Field as written in the file
		raw: String,
	},
	/// Finite floating point number
	Float {
		/// Parsed value
		value: f64,
		/// Field as written in the file
		raw: String,
	},
	/// Empty field
	Empty,
}

impl Cell {
	/// Types a raw CSV field
	///
	/// Empty fields become [`Cell::Empty`], integers and finite floats become
	/// numbers, everything else stays text.
	pub fn parse(raw: &str) -> Self {
		if raw.is_empty() {
			return Self::Empty;
		}
		if let Ok(value) = raw.parse::<i64>() {
			return Self::Integer {
				value,
				raw: raw.to_string(),
			};
		}
		match raw.parse::<f64>() {
			Ok(value) if value.is_finite() => Self::Float {
				value,
				raw: raw.to_string(),
			},
			_ => Self::Text(raw.to_string()),
		}
	}

	/// An integer cell written in canonical form
	pub fn integer(value: i64) -> Self {
		Self::Integer {
			value,
			raw: value.to_string(),
		}
	}

	/// A float cell written in canonical form
	pub fn float(value: f64) -> Self {
		Self::Float {
			value,
			raw: value.to_string(),
		}
	}

	/// Returns the numeric value of this cell, if it has one
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Integer { value, .. } => Some(*value as f64),
			Self::Float { value, .. } => Some(*value),
			_ => None,
		}
	}

	/// Returns true if the cell holds no value
	pub fn is_blank(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Text(text) => text.trim().is_empty(),
			_ => false,
		}
	}

	/// Total order used by the table renderer
	///
	/// Empty cells sort first, then numbers, then text.
	pub fn sort_cmp(&self, other: &Self) -> Ordering {
		fn rank(cell: &Cell) -> u8 {
			match cell {
				Cell::Empty => 0,
				Cell::Integer { .. } | Cell::Float { .. } => 1,
				Cell::Text(_) => 2,
			}
		}

		match (self, other) {
			(Self::Text(a), Self::Text(b)) => a.cmp(b),
			(a, b) => match (a.as_f64(), b.as_f64()) {
				(Some(x), Some(y)) => x.total_cmp(&y),
				_ => rank(a).cmp(&rank(b)),
			},
		}
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Integer { raw, .. } | Self::Float { raw, .. } => f.write_str(raw),
			Self::Empty => Ok(()),
		}
	}
}

impl From<&str> for Cell {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Cell {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<i64> for Cell {
	fn from(value: i64) -> Self {
		Self::integer(value)
	}
}

impl From<i32> for Cell {
	fn from(value: i32) -> Self {
		Self::integer(i64::from(value))
	}
}

impl From<f64> for Cell {
	fn from(value: f64) -> Self {
		Self::float(value)
	}
}

/// One dataset record
///
/// `Cat` and `Country` are fixed string fields; every other column lives in an
/// ordered extension map and is never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
	cat: String,
	country: String,
	extra: IndexMap<String, Cell>,
}

impl Row {
	/// Creates a row with no extra columns
	pub fn new(cat: impl Into<String>, country: impl Into<String>) -> Self {
		Self {
			cat: cat.into(),
			country: country.into(),
			extra: IndexMap::new(),
		}
	}

	/// Creates a row from its fixed fields and an ordered map of extra columns
	pub fn from_parts(
		cat: impl Into<String>,
		country: impl Into<String>,
		extra: IndexMap<String, Cell>,
	) -> Self {
		Self {
			cat: cat.into(),
			country: country.into(),
			extra,
		}
	}

	/// Adds an extra column value
	pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
		self.extra.insert(column.into(), value.into());
		self
	}

	/// Topic/category label
	pub fn cat(&self) -> &str {
		&self.cat
	}

	/// Country code, possibly a `#`-joined group
	pub fn country(&self) -> &str {
		&self.country
	}

	/// Extra columns in file order
	pub fn extra(&self) -> &IndexMap<String, Cell> {
		&self.extra
	}

	/// Looks up the value of any column by header
	pub fn value(&self, column: &str) -> Option<Cow<'_, Cell>> {
		match column {
			CAT_COLUMN => Some(Cow::Owned(Cell::Text(self.cat.clone()))),
			COUNTRY_COLUMN => Some(Cow::Owned(Cell::Text(self.country.clone()))),
			_ => self.extra.get(column).map(Cow::Borrowed),
		}
	}
}

/// The immutable dataset
///
/// A table is an ordered header list plus ordered rows. Filtering produces a
/// new table with the same header list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
	columns: Vec<String>,
	rows: Vec<Row>,
}

impl Table {
	/// Creates a table from an explicit header list and rows
	pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
		Self { columns, rows }
	}

	/// Creates a table whose header list is derived from its rows
	///
	/// The header starts with `Cat` and `Country`, followed by extra columns in
	/// first-seen order.
	pub fn from_rows(rows: Vec<Row>) -> Self {
		let mut columns = vec![CAT_COLUMN.to_string(), COUNTRY_COLUMN.to_string()];
		for row in &rows {
			for name in row.extra.keys() {
				if !columns.iter().any(|c| c == name) {
					columns.push(name.clone());
				}
			}
		}
		Self { columns, rows }
	}

	/// Column headers in display order
	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Rows in file order
	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	/// Number of rows
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if the table has no rows
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns true if the header list contains `name`
	pub fn has_column(&self, name: &str) -> bool {
		self.columns.iter().any(|c| c == name)
	}

	/// Builds a table with the same header list and the given rows
	pub fn with_rows(&self, rows: Vec<Row>) -> Self {
		Self {
			columns: self.columns.clone(),
			rows,
		}
	}
}
