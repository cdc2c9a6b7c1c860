//! Callback dispatcher
//!
//! Each callback is a pure function from input and state values to the new
//! value of one declared output. Requests name the output they want:
//!
//! ```json
//! {"output": "collapse.is_open",
//!  "inputs": [{"id": "toggle", "property": "n_clicks", "value": 1}],
//!  "state":  [{"id": "collapse", "property": "is_open", "value": false}]}
//! ```
//!
//! and the reply maps component ids to updated properties:
//!
//! ```json
//! {"response": {"collapse": {"is_open": true}}}
//! ```

use crate::client::ClientState;
use crate::dashboard::Dashboard;
use crate::error::{PageError, Result};
use crate::nav::{NAV_LINKS, Page};
use crate::selectors::{COUNTRY_SELECTOR, TOPIC_SELECTOR};
use crate::sidebar::toggle_collapse;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tpr_data::SelectionState;
use tpr_tables::{GridState, SortBy};

/// Output id of the multi-output nav callback
pub const ACTIVE_LINKS_OUTPUT: &str =
	"..page-1-link.active...page-2-link.active...page-3-link.active..";

/// One input or state value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackValue {
	/// Component id
	pub id: String,
	/// Component property
	pub property: String,
	/// Current value; absent means `null`
	#[serde(default)]
	pub value: Value,
}

impl CallbackValue {
	/// Creates a value
	pub fn new(id: impl Into<String>, property: impl Into<String>, value: Value) -> Self {
		Self {
			id: id.into(),
			property: property.into(),
			value,
		}
	}
}

/// A callback request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRequest {
	/// Output to recompute, `<id>.<property>`
	pub output: String,
	/// Values that triggered the callback
	#[serde(default)]
	pub inputs: Vec<CallbackValue>,
	/// Values read but not listened to
	#[serde(default)]
	pub state: Vec<CallbackValue>,
}

impl CallbackRequest {
	/// Parses a JSON request body
	///
	/// # Errors
	///
	/// Returns [`PageError::Malformed`] if the body is not a callback request.
	pub fn from_slice(body: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(body)?)
	}

	fn find<'r>(values: &'r [CallbackValue], id: &str, property: &str) -> Option<&'r Value> {
		values
			.iter()
			.find(|v| v.id == id && v.property == property)
			.map(|v| &v.value)
	}

	fn input(&self, id: &str, property: &str) -> Option<&Value> {
		Self::find(&self.inputs, id, property)
	}

	fn state(&self, id: &str, property: &str) -> Option<&Value> {
		Self::find(&self.state, id, property)
	}
}

/// Component properties updated by a callback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackResponse {
	/// Updated properties keyed by component id, then property
	pub response: IndexMap<String, IndexMap<String, Value>>,
}

impl CallbackResponse {
	fn set(mut self, id: &str, property: &str, value: Value) -> Self {
		self.response
			.entry(id.to_string())
			.or_default()
			.insert(property.to_string(), value);
		self
	}
}

/// Outputs the dispatcher knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutput {
	/// `page-content.children` from `url.pathname`
	PageContent,
	/// `page-{1,2,3}-link.active` from `url.pathname`
	ActiveLinks,
	/// `table-container.children` from the two selectors
	TableContainer,
	/// `collapse.is_open` from `toggle.n_clicks`
	CollapseOpen,
}

impl CallbackOutput {
	/// Parses an output id
	pub fn parse(output: &str) -> Option<Self> {
		match output {
			"page-content.children" => Some(Self::PageContent),
			ACTIVE_LINKS_OUTPUT => Some(Self::ActiveLinks),
			"table-container.children" => Some(Self::TableContainer),
			"collapse.is_open" => Some(Self::CollapseOpen),
			_ => None,
		}
	}
}

/// Runs the callback named by `request`
///
/// # Errors
///
/// Returns [`PageError::UnknownOutput`] for an output no callback produces,
/// [`PageError::MissingInput`] when the pathname is absent and
/// [`PageError::InvalidValue`] for malformed values. Non-string selector
/// values are not errors: they render as an inline alert.
pub fn dispatch(dashboard: &Dashboard<'_>, request: &CallbackRequest) -> Result<CallbackResponse> {
	let output = CallbackOutput::parse(&request.output)
		.ok_or_else(|| PageError::UnknownOutput(request.output.clone()))?;
	tracing::debug!(output = %request.output, "Dispatching callback");

	let response = CallbackResponse::default();
	match output {
		CallbackOutput::PageContent => {
			let mut client = ClientState::new(pathname(request)?);
			client.collapse.open = collapse_open(request)?;
			let html = dashboard.render_content(&client);
			Ok(response.set("page-content", "children", Value::String(html)))
		}
		CallbackOutput::ActiveLinks => {
			let (first, second, third) = Page::resolve(&pathname(request)?).active_links();
			Ok(NAV_LINKS
				.iter()
				.zip([first, second, third])
				.fold(response, |response, (link, active)| {
					response.set(link.id, "active", Value::Bool(active))
				}))
		}
		CallbackOutput::TableContainer => {
			let selection = SelectionState::from_values(
				request.input(TOPIC_SELECTOR, "value").unwrap_or(&Value::Null),
				request.input(COUNTRY_SELECTOR, "value").unwrap_or(&Value::Null),
			);
			let grid = grid_state(request)?;
			let mut client = ClientState::default();
			client.collapse.open = collapse_open(request)?;
			let html = dashboard.render_table(selection, &grid, &client.carry_params());
			Ok(response.set("table-container", "children", Value::String(html)))
		}
		CallbackOutput::CollapseOpen => {
			let n_clicks = match request.input("toggle", "n_clicks") {
				None | Some(Value::Null) => None,
				Some(value) => Some(
					value
						.as_u64()
						.ok_or_else(|| invalid("toggle.n_clicks", "expected a click count"))?,
				),
			};
			Ok(response.set(
				"collapse",
				"is_open",
				Value::Bool(toggle_collapse(n_clicks, collapse_open(request)?)),
			))
		}
	}
}

/// Parses and dispatches a raw request body
///
/// # Errors
///
/// See [`CallbackRequest::from_slice`] and [`dispatch`].
pub fn dispatch_json(dashboard: &Dashboard<'_>, body: &[u8]) -> Result<CallbackResponse> {
	let request = CallbackRequest::from_slice(body)?;
	dispatch(dashboard, &request)
}

fn invalid(id: &str, reason: &str) -> PageError {
	PageError::InvalidValue {
		id: id.to_string(),
		reason: reason.to_string(),
	}
}

fn pathname(request: &CallbackRequest) -> Result<String> {
	match request.input("url", "pathname") {
		Some(Value::String(path)) => Ok(path.clone()),
		Some(Value::Null) | None => Err(PageError::MissingInput("url.pathname".to_string())),
		Some(_) => Err(invalid("url.pathname", "expected a string")),
	}
}

/// `collapse.is_open` from the request state, closed when absent
fn collapse_open(request: &CallbackRequest) -> Result<bool> {
	match request.state("collapse", "is_open") {
		None | Some(Value::Null) => Ok(false),
		Some(Value::Bool(open)) => Ok(*open),
		Some(_) => Err(invalid("collapse.is_open", "expected a boolean")),
	}
}

fn grid_state(request: &CallbackRequest) -> Result<GridState> {
	let mut grid = GridState::default();
	match request.state("tab", "sort_by") {
		None | Some(Value::Null) => {}
		Some(value) => {
			grid.sort_by = serde_json::from_value::<Vec<SortBy>>(value.clone())
				.map_err(|err| invalid("tab.sort_by", &err.to_string()))?;
		}
	}
	match request.state("tab", "filter_query") {
		None | Some(Value::Null) => {}
		Some(Value::String(query)) => grid = grid.with_filter_query(query),
		Some(_) => return Err(invalid("tab.filter_query", "expected a string")),
	}
	match request.state("tab", "page_current") {
		None | Some(Value::Null) => {}
		Some(value) => {
			let page = value
				.as_u64()
				.ok_or_else(|| invalid("tab.page_current", "expected a page index"))?;
			grid.page_current = usize::try_from(page)
				.map_err(|_| invalid("tab.page_current", "page index out of range"))?;
		}
	}
	Ok(grid)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use tpr_data::{Catalogs, Row, Table};

	#[fixture]
	fn table() -> Table {
		Table::from_rows(vec![
			Row::new("customs procedures", "BRA").with("Year", 2017),
			Row::new("mfn tariff", "BDI#KEN#RWA#TZA#UGA").with("Year", 2019),
			Row::new("customs procedures", "USA").with("Year", 2018),
		])
	}

	fn request(body: Value) -> CallbackRequest {
		serde_json::from_value(body).unwrap()
	}

	#[rstest]
	#[case("/", [true, false, false])]
	#[case("/page-1", [true, false, false])]
	#[case("/page-2", [false, true, false])]
	#[case("/page-3", [false, false, true])]
	#[case("/nope", [false, false, false])]
	fn test_active_links_callback(table: Table, #[case] path: &str, #[case] expected: [bool; 3]) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let req = request(json!({
			"output": ACTIVE_LINKS_OUTPUT,
			"inputs": [{"id": "url", "property": "pathname", "value": path}],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		assert_eq!(
			serde_json::to_value(&res).unwrap(),
			json!({"response": {
				"page-1-link": {"active": expected[0]},
				"page-2-link": {"active": expected[1]},
				"page-3-link": {"active": expected[2]},
			}})
		);
	}

	#[rstest]
	fn test_page_content_callback(table: Table) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let req = request(json!({
			"output": "page-content.children",
			"inputs": [{"id": "url", "property": "pathname", "value": "/missing"}],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		let html = res.response["page-content"]["children"].as_str().unwrap();
		assert!(html.contains("The pathname /missing was not recognised..."));
	}

	#[rstest]
	fn test_page_content_keeps_open_collapse(table: Table) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let req = request(json!({
			"output": "page-content.children",
			"inputs": [{"id": "url", "property": "pathname", "value": "/page-1"}],
			"state": [{"id": "collapse", "property": "is_open", "value": true}],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		let html = res.response["page-content"]["children"].as_str().unwrap();
		assert!(html.contains("<input type=\"hidden\" name=\"open\" value=\"true\">"));

		let req = request(json!({
			"output": "table-container.children",
			"inputs": [
				{"id": "dropdown_1", "property": "value", "value": "customs procedures"},
				{"id": "dropdown_2", "property": "value", "value": ""},
			],
			"state": [{"id": "collapse", "property": "is_open", "value": true}],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		let html = res.response["table-container"]["children"].as_str().unwrap();
		assert!(html.contains("open=true"));
	}

	#[rstest]
	fn test_table_callback_filters_and_sorts(table: Table) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let req = request(json!({
			"output": "table-container.children",
			"inputs": [
				{"id": "dropdown_1", "property": "value", "value": "customs procedures"},
				{"id": "dropdown_2", "property": "value", "value": ""},
			],
			"state": [
				{"id": "tab", "property": "sort_by", "value": [{"column_id": "Year", "direction": "desc"}]},
			],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		let html = res.response["table-container"]["children"].as_str().unwrap();
		let usa = html.find(">USA<").unwrap();
		let bra = html.find(">BRA<").unwrap();
		assert!(usa < bra);
		assert!(!html.contains("KEN"));
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!(3))]
	#[case(json!(["wto"]))]
	fn test_table_callback_renders_alert_for_bad_selector(table: Table, #[case] topic: Value) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let req = request(json!({
			"output": "table-container.children",
			"inputs": [
				{"id": "dropdown_1", "property": "value", "value": topic},
				{"id": "dropdown_2", "property": "value", "value": ""},
			],
		}));
		let res = dispatch(&dashboard, &req).unwrap();
		let html = res.response["table-container"]["children"].as_str().unwrap();
		assert!(html.contains("role=\"alert\""));
		assert!(html.contains("<tbody></tbody>"));
	}

	#[rstest]
	fn test_collapse_callback_sequence(table: Table) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);
		let mut open = false;
		let mut seen = Vec::new();
		for clicks in 1..=3 {
			let req = request(json!({
				"output": "collapse.is_open",
				"inputs": [{"id": "toggle", "property": "n_clicks", "value": clicks}],
				"state": [{"id": "collapse", "property": "is_open", "value": open}],
			}));
			open = dispatch(&dashboard, &req).unwrap().response["collapse"]["is_open"]
				.as_bool()
				.unwrap();
			seen.push(open);
		}
		assert_eq!(seen, vec![true, false, true]);

		let untouched = request(json!({
			"output": "collapse.is_open",
			"inputs": [{"id": "toggle", "property": "n_clicks", "value": null}],
			"state": [{"id": "collapse", "property": "is_open", "value": true}],
		}));
		let res = dispatch(&dashboard, &untouched).unwrap();
		assert_eq!(res.response["collapse"]["is_open"], json!(true));
	}

	#[rstest]
	fn test_errors(table: Table) {
		let catalogs = Catalogs::default();
		let dashboard = Dashboard::new(&table, &catalogs);

		let unknown = request(json!({"output": "graph.figure"}));
		assert!(matches!(dispatch(&dashboard, &unknown), Err(PageError::UnknownOutput(o)) if o == "graph.figure"));

		let missing = request(json!({"output": "page-content.children"}));
		assert!(matches!(dispatch(&dashboard, &missing), Err(PageError::MissingInput(_))));

		let bad_page = request(json!({
			"output": "table-container.children",
			"inputs": [],
			"state": [{"id": "tab", "property": "page_current", "value": "two"}],
		}));
		assert!(matches!(dispatch(&dashboard, &bad_page), Err(PageError::InvalidValue { id, .. }) if id == "tab.page_current"));

		assert!(matches!(dispatch_json(&dashboard, b"{not json"), Err(PageError::Malformed(_))));
	}
}
