//! Path → page dispatch
//!
//! [`Page::resolve`] is the single path mapping behind both the content block
//! and the active state of the sidebar links.

use serde::{Deserialize, Serialize};

/// Path of the reports page
pub const REPORTS_PATH: &str = "/page-1";

/// A sidebar navigation link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLinkSpec {
	/// DOM id of the link
	pub id: &'static str,
	/// Link text
	pub label: &'static str,
	/// Target path
	pub href: &'static str,
}

/// Sidebar links in display order
pub const NAV_LINKS: [NavLinkSpec; 3] = [
	NavLinkSpec {
		id: "page-1-link",
		label: "TPR Reports",
		href: "/page-1",
	},
	NavLinkSpec {
		id: "page-2-link",
		label: "Charts",
		href: "/page-2",
	},
	NavLinkSpec {
		id: "page-3-link",
		label: "Help",
		href: "/page-3",
	},
];

/// Active flags for the three sidebar links
pub type ActiveLinks = (bool, bool, bool);

/// Content block selected by a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
	/// `/` and `/page-1`: selectors and data table
	Reports,
	/// `/page-2`
	Charts,
	/// `/page-3`
	Help,
	/// Any other path
	NotFound(String),
}

impl Page {
	/// Maps a path to its page
	pub fn resolve(path: &str) -> Self {
		match path {
			"/" | "/page-1" => Self::Reports,
			"/page-2" => Self::Charts,
			"/page-3" => Self::Help,
			other => Self::NotFound(other.to_string()),
		}
	}

	/// Active flags for the sidebar links
	pub fn active_links(&self) -> ActiveLinks {
		match self {
			Self::Reports => (true, false, false),
			Self::Charts => (false, true, false),
			Self::Help => (false, false, true),
			Self::NotFound(_) => (false, false, false),
		}
	}

	/// Returns true for the unknown-path page
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}
}

/// Active flags for the sidebar links at `path`
pub fn active_links(path: &str) -> ActiveLinks {
	Page::resolve(path).active_links()
}

/// Current location, as reported by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
	/// Location pathname
	pub path: String,
}

impl Default for NavState {
	fn default() -> Self {
		Self {
			path: "/".to_string(),
		}
	}
}

impl NavState {
	/// Creates a navigation state for `path`
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}

	/// Page mounted at this location
	pub fn page(&self) -> Page {
		Page::resolve(&self.path)
	}
}
