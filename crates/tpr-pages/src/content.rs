//! Content blocks mounted in `#page-content`

use crate::client::selection_params;
use crate::component::Component;
use crate::dashboard::Dashboard;
use crate::nav::{Page, REPORTS_PATH};
use crate::selectors::Dropdown;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tpr_data::{InputError, SelectionState};
use tpr_tables::{DataGrid, GridLinks, GridState, render_grid, render_grid_error};

/// Placeholder shown on `/page-2`
pub const CHARTS_TEXT: &str = "This is the content of page 2. Yay!";
/// Placeholder shown on `/page-3`
pub const HELP_TEXT: &str = "Oh cool, this is page 3!";

/// Renders the children of `#table-container`
///
/// A rejected selection renders an inline alert over an empty grid that
/// keeps the full table's columns.
pub fn render_table_container(
	dashboard: &Dashboard<'_>,
	selection: Result<SelectionState, InputError>,
	grid_state: &GridState,
	carry: &[(String, String)],
) -> String {
	let filtered = selection.and_then(|selection| {
		let table = selection.apply(dashboard.table())?;
		Ok((selection, table))
	});
	match filtered {
		Ok((selection, table)) => {
			let links = grid_links(&selection, carry);
			let grid = DataGrid::new(&table);
			let view = grid.view(grid_state);
			tracing::debug!(
				topic = %selection.topic,
				country = %selection.country,
				rows = view.rows().len(),
				page = view.pagination().page_current,
				"Rendered table"
			);
			render_grid(&grid, &view, &links)
		}
		Err(err) => {
			tracing::warn!(%err, "Rejected selector input");
			let mut links = GridLinks::new(REPORTS_PATH);
			for (key, value) in carry {
				links = links.with_param(key.clone(), value.clone());
			}
			render_grid_error(&err.to_string(), &DataGrid::new(dashboard.table()), &links)
		}
	}
}

fn grid_links(selection: &SelectionState, carry: &[(String, String)]) -> GridLinks {
	selection_params(selection)
		.into_iter()
		.chain(carry.iter().cloned())
		.fold(GridLinks::new(REPORTS_PATH), |links, (key, value)| {
			links.with_param(key, value)
		})
}

/// Selectors plus data table
#[derive(Debug, Clone)]
pub struct ReportsPanel<'a> {
	dashboard: Dashboard<'a>,
	selection: SelectionState,
	grid: GridState,
	carry: Vec<(String, String)>,
}

impl<'a> ReportsPanel<'a> {
	/// Creates the panel for a selection and grid state
	pub fn new(
		dashboard: Dashboard<'a>,
		selection: SelectionState,
		grid: GridState,
		carry: Vec<(String, String)>,
	) -> Self {
		Self {
			dashboard,
			selection,
			grid,
			carry,
		}
	}
}

impl Component for ReportsPanel<'_> {
	fn name(&self) -> &'static str {
		"ReportsPanel"
	}

	fn render(&self) -> String {
		let catalogs = self.dashboard.catalogs();
		let hidden: String = self
			.carry
			.iter()
			.map(|(key, value)| {
				format!(
					"<input type=\"hidden\" name=\"{}\" value=\"{}\">",
					encode_double_quoted_attribute(key),
					encode_double_quoted_attribute(value)
				)
			})
			.collect();
		format!(
			"<div><form id=\"selection\" class=\"row\" method=\"get\" action=\"{}\">{}{}{}\
			 <div class=\"col-12 selection-apply\"><button type=\"submit\" class=\"btn btn-primary btn-sm\">Apply</button></div>\
			 </form><br><div id=\"table-container\">{}</div></div>",
			REPORTS_PATH,
			hidden,
			Dropdown::topic(catalogs, &self.selection.topic).render(),
			Dropdown::country(catalogs, &self.selection.country).render(),
			render_table_container(
				&self.dashboard,
				Ok(self.selection.clone()),
				&self.grid,
				&self.carry
			)
		)
	}
}

/// Exactly one of the four content blocks
#[derive(Debug, Clone)]
pub enum ContentBlock<'a> {
	/// `/` and `/page-1`
	Reports(ReportsPanel<'a>),
	/// `/page-2`
	Charts,
	/// `/page-3`
	Help,
	/// Unknown path
	NotFound(String),
}

impl<'a> ContentBlock<'a> {
	/// Selects the block for `page`; `panel` is used only for the reports page
	pub fn for_page(page: Page, panel: ReportsPanel<'a>) -> Self {
		match page {
			Page::Reports => Self::Reports(panel),
			Page::Charts => Self::Charts,
			Page::Help => Self::Help,
			Page::NotFound(path) => Self::NotFound(path),
		}
	}
}

impl Component for ContentBlock<'_> {
	fn name(&self) -> &'static str {
		"ContentBlock"
	}

	fn render(&self) -> String {
		match self {
			Self::Reports(panel) => panel.render(),
			Self::Charts => format!("<p>{}</p>", CHARTS_TEXT),
			Self::Help => format!("<p>{}</p>", HELP_TEXT),
			Self::NotFound(path) => format!(
				"<div class=\"jumbotron\"><h1 class=\"text-danger\">404: Not found</h1><hr>\
				 <p>The pathname {} was not recognised...</p></div>",
				encode_text(path)
			),
		}
	}
}
