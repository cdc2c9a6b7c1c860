//! The Topic/Country filtering engine
//!
//! A row is kept when the selected topic occurs anywhere inside its `Cat`
//! value and the selected country occurs anywhere inside its `Country` value.
//! Containment rather than equality lets a single code such as `KEN` match a
//! grouped value such as `BDI#KEN#RWA#TZA#UGA`. The empty string is contained
//! in every string, which is how "no country filter" is expressed.

use crate::error::InputError;
use crate::record::{CAT_COLUMN, COUNTRY_COLUMN, Table};
use serde_json::Value;

/// Topic selected when a page is first rendered
pub const DEFAULT_TOPIC: &str = "economic environment";

/// Country selected when a page is first rendered (no filter)
pub const DEFAULT_COUNTRY: &str = "";

/// Current values of the two selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
	/// Topic selector value
	pub topic: String,
	/// Country selector value
	pub country: String,
}

impl Default for SelectionState {
	fn default() -> Self {
		Self {
			topic: DEFAULT_TOPIC.to_string(),
			country: DEFAULT_COUNTRY.to_string(),
		}
	}
}

impl SelectionState {
	/// Creates a selection from plain strings
	pub fn new(topic: impl Into<String>, country: impl Into<String>) -> Self {
		Self {
			topic: topic.into(),
			country: country.into(),
		}
	}

	/// Builds a selection from raw selector values
	///
	/// # Errors
	///
	/// Returns [`InputError::NonStringSelector`] if either value is not a JSON
	/// string.
	pub fn from_values(topic: &Value, country: &Value) -> Result<Self, InputError> {
		Ok(Self {
			topic: selector_value("dropdown_1", topic)?,
			country: selector_value("dropdown_2", country)?,
		})
	}

	/// Applies this selection to a table
	pub fn apply(&self, table: &Table) -> Result<Table, InputError> {
		filter(table, &self.topic, &self.country)
	}
}

/// Extracts a selector's string value without coercion
///
/// A cleared dropdown delivers `null`; numbers, booleans, arrays and objects
/// are equally rejected.
pub fn selector_value(selector: &str, value: &Value) -> Result<String, InputError> {
	match value {
		Value::String(s) => Ok(s.clone()),
		other => Err(InputError::NonStringSelector {
			selector: selector.to_string(),
			found: json_type(other),
		}),
	}
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// Filters `table` down to rows matching both selectors
///
/// The result keeps the input's column set and row order and is never
/// truncated; pagination belongs to the renderer.
///
/// # Errors
///
/// Returns [`InputError::MissingColumn`] if the table's header list does not
/// name `Cat` or `Country`.
pub fn filter(table: &Table, topic: &str, country: &str) -> Result<Table, InputError> {
	for required in [CAT_COLUMN, COUNTRY_COLUMN] {
		if !table.has_column(required) {
			return Err(InputError::MissingColumn(required.to_string()));
		}
	}

	let rows = table
		.rows()
		.iter()
		.filter(|row| row.cat().contains(topic) && row.country().contains(country))
		.cloned()
		.collect::<Vec<_>>();

	tracing::debug!(
		topic,
		country,
		matched = rows.len(),
		total = table.len(),
		"Filtered dataset"
	);

	Ok(table.with_rows(rows))
}
