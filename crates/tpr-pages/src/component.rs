//! Core component trait

use html_escape::encode_double_quoted_attribute;
use indexmap::IndexMap;

/// A piece of server-rendered markup
///
/// Pages are trees of components; a parent renders its children in place.
pub trait Component: Send + Sync {
	/// Name used in logs
	fn name(&self) -> &'static str;

	/// Renders the component as HTML
	fn render(&self) -> String;

	/// Returns CSS classes for the component
	fn classes(&self) -> Vec<String> {
		vec![]
	}

	/// Returns HTML attributes for the component, in output order
	fn attributes(&self) -> IndexMap<String, String> {
		IndexMap::new()
	}

	/// Returns child components (if any)
	fn children(&self) -> Vec<Box<dyn Component>> {
		vec![]
	}

	/// Renders all children to HTML
	fn render_children(&self) -> String {
		self.children()
			.iter()
			.map(|c| c.render())
			.collect::<Vec<_>>()
			.join("")
	}

	/// Renders `class` and the other attributes as an attribute list
	///
	/// The result starts with a space unless it is empty.
	fn render_attributes(&self) -> String {
		let mut out = String::new();
		let classes = self.classes();
		if !classes.is_empty() {
			out.push_str(&format!(
				" class=\"{}\"",
				encode_double_quoted_attribute(&classes.join(" "))
			));
		}
		for (key, value) in self.attributes() {
			out.push_str(&format!(
				" {}=\"{}\"",
				key,
				encode_double_quoted_attribute(&value)
			));
		}
		out
	}
}
