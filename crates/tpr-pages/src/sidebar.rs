//! Sidebar with title, collapse toggle and navigation links
//!
//! On narrow viewports the links sit inside a collapse that the toggle opens
//! and closes. Wide viewports hide the toggle and force the collapse open in
//! CSS, so the open flag only matters on small screens.

use crate::component::Component;
use crate::nav::{ActiveLinks, NAV_LINKS, NavLinkSpec};
use html_escape::{encode_double_quoted_attribute, encode_text};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Text under the sidebar title
pub const BLURB: &str = "Select a topic or country ";

/// Next open state of the collapse
///
/// Flips `is_open` when the toggle has been clicked (a non-zero click count)
/// and returns it unchanged otherwise.
pub fn toggle_collapse(n_clicks: Option<u64>, is_open: bool) -> bool {
	match n_clicks {
		Some(n) if n > 0 => !is_open,
		_ => is_open,
	}
}

/// Open state of the sidebar collapse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseState {
	/// Whether the links are shown on narrow viewports
	pub open: bool,
}

impl CollapseState {
	/// Applies a toggle event
	pub fn toggle(self, n_clicks: Option<u64>) -> Self {
		Self {
			open: toggle_collapse(n_clicks, self.open),
		}
	}
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
	spec: NavLinkSpec,
	active: bool,
	carry: Vec<(String, String)>,
}

impl NavLink {
	/// Creates a link
	pub fn new(spec: NavLinkSpec, active: bool) -> Self {
		Self {
			spec,
			active,
			carry: Vec::new(),
		}
	}

	/// Appends query parameters that survive navigation to the target
	pub fn with_carry(mut self, carry: Vec<(String, String)>) -> Self {
		self.carry = carry;
		self
	}

	/// Target path plus any carried parameters
	pub fn href(&self) -> String {
		if self.carry.is_empty() {
			return self.spec.href.to_string();
		}
		let query = serde_urlencoded::to_string(&self.carry).unwrap_or_default();
		format!("{}?{}", self.spec.href, query)
	}
}

impl Component for NavLink {
	fn name(&self) -> &'static str {
		"NavLink"
	}

	fn render(&self) -> String {
		format!(
			"<li class=\"nav-item\"><a{}>{}</a></li>",
			self.render_attributes(),
			encode_text(self.spec.label)
		)
	}

	fn classes(&self) -> Vec<String> {
		let mut classes = vec!["nav-link".to_string()];
		if self.active {
			classes.push("active".to_string());
		}
		classes
	}

	fn attributes(&self) -> IndexMap<String, String> {
		let mut attrs = IndexMap::new();
		attrs.insert("id".to_string(), self.spec.id.to_string());
		attrs.insert("href".to_string(), self.href());
		attrs
	}
}

/// The sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
	title: String,
	collapse: CollapseState,
	active: ActiveLinks,
	toggle_href: String,
	carry: Vec<(String, String)>,
}

impl Sidebar {
	/// Creates a sidebar
	///
	/// `toggle_href` is followed when the toggle is used without scripts; it
	/// should reload the current page with the collapse flipped.
	pub fn new(
		title: impl Into<String>,
		collapse: CollapseState,
		active: ActiveLinks,
		toggle_href: impl Into<String>,
	) -> Self {
		Self {
			title: title.into(),
			collapse,
			active,
			toggle_href: toggle_href.into(),
			carry: Vec::new(),
		}
	}

	/// Query parameters every navigation link carries to its page
	pub fn with_carry(mut self, carry: Vec<(String, String)>) -> Self {
		self.carry = carry;
		self
	}

	fn collapse_classes(&self) -> &'static str {
		if self.collapse.open {
			"collapse show"
		} else {
			"collapse"
		}
	}
}

impl Component for Sidebar {
	fn name(&self) -> &'static str {
		"Sidebar"
	}

	fn render(&self) -> String {
		format!(
			"<div id=\"sidebar\"><div class=\"row sidebar-header\">\
			 <div class=\"col\"><h2 class=\"display-4\">{}</h2></div>\
			 <div class=\"col-auto align-self-center\">\
			 <a id=\"toggle\" class=\"navbar-toggler\" role=\"button\" href=\"{}\" \
			 aria-controls=\"collapse\" aria-expanded=\"{}\"><span class=\"navbar-toggler-icon\"></span></a>\
			 </div></div>\
			 <div id=\"blurb\"><hr><p class=\"lead\">{}</p></div>\
			 <div id=\"collapse\" class=\"{}\"><ul class=\"nav nav-pills flex-column\">{}</ul></div></div>",
			encode_text(&self.title),
			encode_double_quoted_attribute(&self.toggle_href),
			self.collapse.open,
			encode_text(BLURB),
			self.collapse_classes(),
			self.render_children()
		)
	}

	fn children(&self) -> Vec<Box<dyn Component>> {
		let (first, second, third) = self.active;
		NAV_LINKS
			.iter()
			.zip([first, second, third])
			.map(|(spec, active)| {
				Box::new(NavLink::new(*spec, active).with_carry(self.carry.clone())) as Box<dyn Component>
			})
			.collect()
	}
}
