//! Document shell and embedded assets

use crate::component::Component;
use crate::sidebar::Sidebar;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Bootstrap stylesheet loaded by every page
pub const BOOTSTRAP_CSS: &str =
	"https://stackpath.bootstrapcdn.com/bootstrap/4.3.1/css/bootstrap.min.css";

/// URL of the dashboard stylesheet
pub const CSS_PATH: &str = "/assets/dashboard.css";
/// URL of the dashboard script
pub const JS_PATH: &str = "/assets/dashboard.js";

/// Sidebar and responsive layout rules
pub const DASHBOARD_CSS: &str = include_str!("../assets/dashboard.css");
/// Script that routes control changes through the callback endpoint
pub const DASHBOARD_JS: &str = include_str!("../assets/dashboard.js");

/// An embedded static asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
	/// `Content-Type` header value
	pub content_type: &'static str,
	/// File contents
	pub body: &'static str,
}

/// Looks up an embedded asset by request path
pub fn asset(path: &str) -> Option<Asset> {
	match path {
		CSS_PATH => Some(Asset {
			content_type: "text/css; charset=utf-8",
			body: DASHBOARD_CSS,
		}),
		JS_PATH => Some(Asset {
			content_type: "application/javascript; charset=utf-8",
			body: DASHBOARD_JS,
		}),
		_ => None,
	}
}

/// The complete HTML page: location marker, sidebar and content
#[derive(Debug, Clone)]
pub struct Document {
	title: String,
	pathname: String,
	sidebar: Sidebar,
	content: String,
}

impl Document {
	/// Creates a document around pre-rendered content
	pub fn new(
		title: impl Into<String>,
		pathname: impl Into<String>,
		sidebar: Sidebar,
		content: impl Into<String>,
	) -> Self {
		Self {
			title: title.into(),
			pathname: pathname.into(),
			sidebar,
			content: content.into(),
		}
	}
}

impl Component for Document {
	fn name(&self) -> &'static str {
		"Document"
	}

	fn render(&self) -> String {
		format!(
			"<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
			 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
			 <title>{}</title>\
			 <link rel=\"stylesheet\" href=\"{}\"><link rel=\"stylesheet\" href=\"{}\">\
			 </head><body><div id=\"react-entry-point\">\
			 <div id=\"url\" data-pathname=\"{}\"></div>{}\
			 <div id=\"page-content\">{}</div></div>\
			 <script src=\"{}\" defer></script></body></html>\n",
			encode_text(&self.title),
			BOOTSTRAP_CSS,
			CSS_PATH,
			encode_double_quoted_attribute(&self.pathname),
			self.render_children(),
			self.content,
			JS_PATH
		)
	}

	fn children(&self) -> Vec<Box<dyn Component>> {
		vec![Box::new(self.sidebar.clone())]
	}
}
