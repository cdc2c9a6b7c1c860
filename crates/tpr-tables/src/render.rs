//! HTML rendering for grids
//!
//! Every interactive element is a plain link or form field, so the grid works
//! without scripts: header links cycle the sort, a GET form submits column
//! filters and the pager links move between pages.

use crate::column::Column;
use crate::grid::{DataGrid, GridState, GridView};
use crate::sorting::{click_header, direction_of};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Builds grid URLs on top of the page's own query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLinks {
	path: String,
	params: Vec<(String, String)>,
}

impl GridLinks {
	/// Creates links that point back at `path`
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			params: Vec::new(),
		}
	}

	/// Adds a query parameter carried by every grid link
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((key.into(), value.into()));
		self
	}

	/// Path the links point at
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Parameters carried by every link
	pub fn params(&self) -> &[(String, String)] {
		&self.params
	}

	/// URL that loads the page with `state` applied
	pub fn href(&self, state: &GridState) -> String {
		let mut pairs = self.params.clone();
		pairs.extend(state.to_query_pairs());
		let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
		if query.is_empty() {
			self.path.clone()
		} else {
			format!("{}?{}", self.path, query)
		}
	}
}

/// Renders a grid view as an HTML table with its filter row and pager
pub fn render_grid(grid: &DataGrid<'_>, view: &GridView<'_>, links: &GridLinks) -> String {
	let id = encode_double_quoted_attribute(grid.options().id()).into_owned();
	let state = view.state();
	let mut html = String::new();

	html.push_str(&format!("<div class=\"dash-table-container\" id=\"{}\">", id));
	html.push_str(&render_filter_form(&id, state, links));
	html.push_str("<table class=\"table table-sm table-striped dash-spreadsheet\"><thead><tr>");

	for column in view.columns() {
		let name = encode_text(column.name());
		if !column.sortable() {
			html.push_str(&format!("<th>{}</th>", name));
			continue;
		}
		let next = GridState {
			sort_by: click_header(&state.sort_by, column.id(), grid.options().sort_mode()),
			..state.clone()
		};
		let indicator = direction_of(&state.sort_by, column.id())
			.map(|direction| format!(" {}", direction.indicator()))
			.unwrap_or_default();
		html.push_str(&format!(
			"<th class=\"column-header\"><a class=\"column-header--sort\" href=\"{}\">{}</a>{}</th>",
			encode_double_quoted_attribute(&links.href(&next)),
			name,
			indicator
		));
	}
	html.push_str("</tr><tr class=\"dash-filter\">");

	for column in view.columns() {
		if !column.filterable() {
			html.push_str("<th></th>");
			continue;
		}
		let value = state.filters.get(column.id()).map(String::as_str).unwrap_or("");
		let invalid = if view.is_filter_invalid(column.id()) {
			" is-invalid"
		} else {
			""
		};
		html.push_str(&format!(
			"<th><input type=\"text\" class=\"form-control form-control-sm{}\" form=\"{}-filters\" \
			 name=\"filter[{}]\" value=\"{}\" placeholder=\"filter data...\"></th>",
			invalid,
			id,
			encode_double_quoted_attribute(column.id()),
			encode_double_quoted_attribute(value)
		));
	}
	html.push_str("</tr></thead><tbody>");

	let style = encode_double_quoted_attribute(&grid.options().style_cell().to_css()).into_owned();
	for row in view.page_rows() {
		html.push_str("<tr>");
		for column in view.columns() {
			html.push_str(&format!(
				"<td style=\"{}\">{}</td>",
				style,
				encode_text(&column.render(row))
			));
		}
		html.push_str("</tr>");
	}
	html.push_str("</tbody></table>");
	html.push_str(&render_pager(view, links));
	html.push_str("</div>");
	html
}

/// Renders an inline error followed by an empty grid
pub fn render_grid_error(message: &str, grid: &DataGrid<'_>, links: &GridLinks) -> String {
	format!(
		"<div class=\"alert alert-warning\" role=\"alert\">{}</div>{}",
		encode_text(message),
		render_grid(grid, &grid.empty_view(), links)
	)
}

fn render_filter_form(id: &str, state: &GridState, links: &GridLinks) -> String {
	let mut html = String::new();
	html.push_str(&format!(
		"<form id=\"{}-filters\" class=\"dash-filter-form\" method=\"get\" action=\"{}\">",
		id,
		encode_double_quoted_attribute(links.path())
	));
	let sort = GridState {
		sort_by: state.sort_by.clone(),
		..GridState::default()
	};
	for (key, value) in links.params().iter().chain(sort.to_query_pairs().iter()) {
		html.push_str(&format!(
			"<input type=\"hidden\" name=\"{}\" value=\"{}\">",
			encode_double_quoted_attribute(key),
			encode_double_quoted_attribute(value)
		));
	}
	html.push_str("<button type=\"submit\" class=\"d-none\">Filter</button></form>");
	html
}

fn render_pager(view: &GridView<'_>, links: &GridLinks) -> String {
	let pagination = view.pagination();
	if pagination.total_pages() <= 1 {
		return String::new();
	}
	let state = view.state();
	let page_link = |page: usize, label: &str, enabled: bool| {
		if enabled {
			let target = state.clone().with_page(page);
			format!(
				"<li class=\"page-item\"><a class=\"page-link\" href=\"{}\">{}</a></li>",
				encode_double_quoted_attribute(&links.href(&target)),
				label
			)
		} else {
			format!(
				"<li class=\"page-item disabled\"><span class=\"page-link\">{}</span></li>",
				label
			)
		}
	};

	let current = pagination.page_current;
	let last = pagination.total_pages() - 1;
	let mut html = String::from("<nav class=\"previous-next-container\"><ul class=\"pagination pagination-sm\">");
	html.push_str(&page_link(0, "&laquo;", pagination.has_previous()));
	html.push_str(&page_link(current.saturating_sub(1), "&lsaquo;", pagination.has_previous()));
	html.push_str(&format!(
		"<li class=\"page-item active\"><span class=\"page-link page-number\">{} / {}</span></li>",
		current + 1,
		last + 1
	));
	html.push_str(&page_link(current + 1, "&rsaquo;", pagination.has_next()));
	html.push_str(&page_link(last, "&raquo;", pagination.has_next()));
	html.push_str("</ul></nav>");
	html
}
