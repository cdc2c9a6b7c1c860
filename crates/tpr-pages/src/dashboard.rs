//! The dashboard: shared data plus the page and layout renderers

use crate::client::ClientState;
use crate::component::Component;
use crate::content::{ContentBlock, ReportsPanel, render_table_container};
use crate::layout::Document;
use crate::nav::NAV_LINKS;
use crate::selectors::{COUNTRY_SELECTOR, TOPIC_SELECTOR};
use crate::sidebar::Sidebar;
use serde_json::{Value, json};
use tpr_data::{Catalogs, DEFAULT_COUNTRY, DEFAULT_TOPIC, InputError, SelectionState, Table};
use tpr_tables::{GridOptions, GridState};

/// Default document and sidebar title
pub const DEFAULT_TITLE: &str = "Reports";

/// Read-only view over the loaded dataset and catalogs
///
/// Cheap to copy; the server builds one per request from its shared state.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
	table: &'a Table,
	catalogs: &'a Catalogs,
	title: &'a str,
}

impl<'a> Dashboard<'a> {
	/// Creates a dashboard titled "Reports"
	pub fn new(table: &'a Table, catalogs: &'a Catalogs) -> Self {
		Self {
			table,
			catalogs,
			title: DEFAULT_TITLE,
		}
	}

	/// Overrides the title
	pub fn with_title(mut self, title: &'a str) -> Self {
		self.title = title;
		self
	}

	/// The full dataset
	pub fn table(&self) -> &'a Table {
		self.table
	}

	/// Selector catalogs
	pub fn catalogs(&self) -> &'a Catalogs {
		self.catalogs
	}

	/// Document title
	pub fn title(&self) -> &'a str {
		self.title
	}

	/// Renders the block for the client's current page
	pub fn render_content(&self, client: &ClientState) -> String {
		let panel = ReportsPanel::new(
			*self,
			client.selection.clone(),
			client.grid.clone(),
			client.carry_params(),
		);
		ContentBlock::for_page(client.nav.page(), panel).render()
	}

	/// Renders the children of `#table-container`
	pub fn render_table(
		&self,
		selection: Result<SelectionState, InputError>,
		grid: &GridState,
		carry: &[(String, String)],
	) -> String {
		render_table_container(self, selection, grid, carry)
	}

	/// Renders the complete HTML document for a client state
	pub fn render_document(&self, client: &ClientState) -> String {
		let sidebar = Sidebar::new(
			self.title,
			client.collapse,
			client.nav.page().active_links(),
			client.toggle_href(),
		)
		.with_carry(client.carry_params());
		Document::new(self.title, client.nav.path.clone(), sidebar, self.render_content(client)).render()
	}

	/// Describes the layout for script clients
	pub fn layout(&self) -> Value {
		let options = GridOptions::default();
		json!({
			"title": self.title,
			"nav": NAV_LINKS
				.iter()
				.map(|link| json!({"id": link.id, "label": link.label, "href": link.href}))
				.collect::<Vec<_>>(),
			"selectors": {
				TOPIC_SELECTOR: {
					"label": "Topic",
					"options": self.catalogs.topics(),
					"value": DEFAULT_TOPIC,
				},
				COUNTRY_SELECTOR: {
					"label": "Country",
					"options": self.catalogs.countries(),
					"value": DEFAULT_COUNTRY,
				},
			},
			"grid": {
				"id": options.id(),
				"columns": self.table.columns(),
				"page_size": options.page_size(),
				"sort_mode": options.sort_mode(),
				"style_cell": options.style_cell().to_css(),
			},
			"rows": self.table.len(),
		})
	}
}
