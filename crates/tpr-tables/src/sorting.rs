//! Sorting functionality for grids

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[serde(rename = "asc")]
	Ascending,
	/// Descending order
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	/// Parses a sort direction from a query parameter
	///
	/// Returns `Ascending` for positive values and `Descending` for negative values
	/// (e.g., "name" -> Ascending, "-name" -> Descending)
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}

	/// Applies this direction to an ascending comparison
	pub fn apply(&self, ordering: Ordering) -> Ordering {
		match self {
			Self::Ascending => ordering,
			Self::Descending => ordering.reverse(),
		}
	}

	/// Arrow shown next to a sorted header
	pub fn indicator(&self) -> &'static str {
		match self {
			Self::Ascending => "▲",
			Self::Descending => "▼",
		}
	}
}

/// Whether header clicks replace or extend the current ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
	/// Only one column sorts at a time
	Single,
	/// Clicked columns are appended as secondary keys
	#[default]
	Multi,
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
	/// Column identifier
	pub column_id: String,
	/// Direction for this key
	pub direction: SortDirection,
}

impl SortBy {
	/// Creates a sort key
	pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column_id: column_id.into(),
			direction,
		}
	}

	/// Formats this key for a query parameter (`Year` or `-Year`)
	pub fn to_query(&self) -> String {
		match self.direction {
			SortDirection::Ascending => self.column_id.clone(),
			SortDirection::Descending => format!("-{}", self.column_id),
		}
	}

	/// Parses a comma separated `sort` query parameter
	///
	/// Empty segments are skipped.
	pub fn parse_list(s: &str) -> Vec<Self> {
		s.split(',')
			.filter(|segment| !segment.is_empty())
			.map(|segment| {
				let (direction, field) = SortDirection::parse_from_query(segment);
				Self::new(field, direction)
			})
			.collect()
	}

	/// Formats keys as a comma separated `sort` query parameter
	pub fn format_list(keys: &[Self]) -> String {
		keys.iter().map(Self::to_query).collect::<Vec<_>>().join(",")
	}
}

/// Computes the ordering that results from clicking a column header
///
/// A column cycles through unsorted, ascending and descending, then back to
/// unsorted. In [`SortMode::Multi`] other keys keep their position; a newly
/// sorted column is appended as the least significant key.
pub fn click_header(current: &[SortBy], column_id: &str, mode: SortMode) -> Vec<SortBy> {
	let existing = current.iter().find(|key| key.column_id == column_id);
	let next = match existing.map(|key| key.direction) {
		None => Some(SortDirection::Ascending),
		Some(SortDirection::Ascending) => Some(SortDirection::Descending),
		Some(SortDirection::Descending) => None,
	};

	match mode {
		SortMode::Single => next
			.map(|direction| vec![SortBy::new(column_id, direction)])
			.unwrap_or_default(),
		SortMode::Multi => {
			let mut keys: Vec<SortBy> = Vec::with_capacity(current.len() + 1);
			let mut placed = false;
			for key in current {
				if key.column_id == column_id {
					if let Some(direction) = next {
						keys.push(SortBy::new(column_id, direction));
					}
					placed = true;
				} else {
					keys.push(key.clone());
				}
			}
			if !placed {
				if let Some(direction) = next {
					keys.push(SortBy::new(column_id, direction));
				}
			}
			keys
		}
	}
}

/// Returns the direction a column is currently sorted in, if any
pub fn direction_of(keys: &[SortBy], column_id: &str) -> Option<SortDirection> {
	keys.iter()
		.find(|key| key.column_id == column_id)
		.map(|key| key.direction)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Year", SortDirection::Ascending, "Year")]
	#[case("-Year", SortDirection::Descending, "Year")]
	fn test_parse_from_query(
		#[case] input: &str,
		#[case] direction: SortDirection,
		#[case] field: &str,
	) {
		assert_eq!(SortDirection::parse_from_query(input), (direction, field));
	}

	#[rstest]
	fn test_sort_list_round_trip() {
		let keys = SortBy::parse_list("Cat,-Year,,Country");
		assert_eq!(
			keys,
			vec![
				SortBy::new("Cat", SortDirection::Ascending),
				SortBy::new("Year", SortDirection::Descending),
				SortBy::new("Country", SortDirection::Ascending),
			]
		);
		assert_eq!(SortBy::format_list(&keys), "Cat,-Year,Country");
	}

	#[rstest]
	fn test_click_header_cycles_single_column() {
		let first = click_header(&[], "Year", SortMode::Multi);
		assert_eq!(first, vec![SortBy::new("Year", SortDirection::Ascending)]);

		let second = click_header(&first, "Year", SortMode::Multi);
		assert_eq!(second, vec![SortBy::new("Year", SortDirection::Descending)]);

		let third = click_header(&second, "Year", SortMode::Multi);
		assert!(third.is_empty());
	}

	#[rstest]
	fn test_click_header_multi_appends_and_keeps_position() {
		let keys = vec![
			SortBy::new("Cat", SortDirection::Ascending),
			SortBy::new("Year", SortDirection::Ascending),
		];

		let appended = click_header(&keys, "Country", SortMode::Multi);
		assert_eq!(appended.len(), 3);
		assert_eq!(appended[2].column_id, "Country");

		let toggled = click_header(&keys, "Cat", SortMode::Multi);
		assert_eq!(toggled[0], SortBy::new("Cat", SortDirection::Descending));
		assert_eq!(toggled[1], SortBy::new("Year", SortDirection::Ascending));
	}

	#[rstest]
	fn test_click_header_single_replaces() {
		let keys = vec![SortBy::new("Cat", SortDirection::Ascending)];
		let replaced = click_header(&keys, "Year", SortMode::Single);
		assert_eq!(replaced, vec![SortBy::new("Year", SortDirection::Ascending)]);
	}

	#[rstest]
	fn test_sort_by_serde_uses_short_directions() {
		let key = SortBy::new("Year", SortDirection::Descending);
		let json = serde_json::to_value(&key).unwrap();
		assert_eq!(json, serde_json::json!({"column_id": "Year", "direction": "desc"}));
	}
}
