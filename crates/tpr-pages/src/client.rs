//! Client-held page state carried in the URL
//!
//! The server keeps no sessions. Every request names its own selection,
//! grid state and collapse state in the query string, and every link the
//! server renders writes them back.

use crate::nav::{NavState, Page};
use crate::sidebar::CollapseState;
use tpr_data::SelectionState;
use tpr_tables::GridState;

/// Everything the client tells the server about its view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
	/// Current location
	pub nav: NavState,
	/// Topic and Country selector values
	pub selection: SelectionState,
	/// Sort keys, column filters and page of the data grid
	pub grid: GridState,
	/// Sidebar collapse, after applying any toggle in the request
	pub collapse: CollapseState,
}

impl ClientState {
	/// Default state at `path`
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			nav: NavState::new(path),
			..Self::default()
		}
	}

	/// Reads the state from a path and its decoded query pairs
	///
	/// Recognised keys are `topic`, `country`, `open`, `toggle` and the grid
	/// keys (`sort`, `page`, `filter[<column>]`). Missing selector values fall
	/// back to their defaults; a later duplicate key wins.
	pub fn from_query(path: &str, pairs: &[(String, String)]) -> Self {
		let mut selection = SelectionState::default();
		let mut open = false;
		let mut toggle = None;
		for (key, value) in pairs {
			match key.as_str() {
				"topic" => selection.topic = value.clone(),
				"country" => selection.country = value.clone(),
				"open" => open = matches!(value.as_str(), "true" | "1"),
				"toggle" => toggle = value.parse::<u64>().ok(),
				_ => {}
			}
		}
		Self {
			nav: NavState::new(path),
			selection,
			grid: GridState::from_query_pairs(pairs),
			collapse: CollapseState { open }.toggle(toggle),
		}
	}

	/// Selector parameters; an empty country is left out
	pub fn selection_params(&self) -> Vec<(String, String)> {
		selection_params(&self.selection)
	}

	/// Parameters that keep the sidebar state across navigation
	pub fn carry_params(&self) -> Vec<(String, String)> {
		if self.collapse.open {
			vec![("open".to_string(), "true".to_string())]
		} else {
			Vec::new()
		}
	}

	/// URL that reloads the current view with the collapse toggled once
	pub fn toggle_href(&self) -> String {
		let mut pairs = Vec::new();
		if self.nav.page() == Page::Reports {
			pairs.extend(self.selection_params());
			pairs.extend(self.grid.to_query_pairs());
		}
		pairs.push(("open".to_string(), self.collapse.open.to_string()));
		pairs.push(("toggle".to_string(), "1".to_string()));
		let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
		format!("{}?{}", self.nav.path, query)
	}
}

/// Query parameters for a selection; an empty country is left out
pub fn selection_params(selection: &SelectionState) -> Vec<(String, String)> {
	let mut params = vec![("topic".to_string(), selection.topic.clone())];
	if !selection.country.is_empty() {
		params.push(("country".to_string(), selection.country.clone()));
	}
	params
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tpr_tables::SortDirection;

	fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
		raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	#[rstest]
	fn test_defaults_without_query() {
		let state = ClientState::from_query("/", &[]);
		assert_eq!(state.selection, SelectionState::default());
		assert_eq!(state.grid, GridState::default());
		assert!(!state.collapse.open);
	}

	#[rstest]
	fn test_reads_every_parameter() {
		let state = ClientState::from_query(
			"/page-1",
			&pairs(&[
				("topic", "mfn tariff"),
				("country", "KEN"),
				("sort", "-Year"),
				("filter[Cat]", "contains tariff"),
				("page", "1"),
				("open", "false"),
				("toggle", "1"),
			]),
		);
		assert_eq!(state.selection, SelectionState::new("mfn tariff", "KEN"));
		assert_eq!(
			state.grid,
			GridState::default()
				.with_sort("Year", SortDirection::Descending)
				.with_filter("Cat", "contains tariff")
				.with_page(1)
		);
		assert!(state.collapse.open);
	}

	#[rstest]
	#[case("true", None, true)]
	#[case("true", Some("1"), false)]
	#[case("false", Some("0"), false)]
	#[case("nonsense", Some("x"), false)]
	fn test_collapse_from_query(#[case] open: &str, #[case] toggle: Option<&str>, #[case] expected: bool) {
		let mut raw = vec![("open", open)];
		if let Some(toggle) = toggle {
			raw.push(("toggle", toggle));
		}
		assert_eq!(ClientState::from_query("/", &pairs(&raw)).collapse.open, expected);
	}

	#[rstest]
	fn test_toggle_href_round_trips_view() {
		let state = ClientState::from_query("/page-1", &pairs(&[("topic", "wto"), ("sort", "Cat")]));
		assert_eq!(state.toggle_href(), "/page-1?topic=wto&sort=Cat&open=false&toggle=1");

		let help = ClientState::from_query("/page-3", &pairs(&[("open", "true")]));
		assert_eq!(help.toggle_href(), "/page-3?open=true&toggle=1");
	}

	#[rstest]
	fn test_selection_params_skip_empty_country() {
		assert_eq!(
			selection_params(&SelectionState::default()),
			pairs(&[("topic", "economic environment")])
		);
		assert_eq!(
			selection_params(&SelectionState::new("wto", "BRA")),
			pairs(&[("topic", "wto"), ("country", "BRA")])
		);
	}
}
