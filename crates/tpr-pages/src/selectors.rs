//! Topic and Country dropdowns

use crate::component::Component;
use html_escape::{encode_double_quoted_attribute, encode_text};
use indexmap::IndexMap;
use tpr_data::Catalogs;

/// DOM id of the Topic dropdown
pub const TOPIC_SELECTOR: &str = "dropdown_1";
/// DOM id of the Country dropdown
pub const COUNTRY_SELECTOR: &str = "dropdown_2";

/// Text shown for the empty "no filter" choice
const ANY_LABEL: &str = "(any)";

/// A labelled single-choice dropdown
///
/// Values outside the option list are tolerated: they are shown as an extra
/// selected option so the page reflects what is actually being filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
	id: String,
	field: String,
	label: String,
	options: Vec<String>,
	value: String,
}

impl Dropdown {
	/// Creates a dropdown submitted under the form field `field`
	pub fn new(
		id: impl Into<String>,
		field: impl Into<String>,
		label: impl Into<String>,
		options: Vec<String>,
		value: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			field: field.into(),
			label: label.into(),
			options,
			value: value.into(),
		}
	}

	/// The Topic dropdown over the topic catalog
	pub fn topic(catalogs: &Catalogs, value: &str) -> Self {
		Self::new(TOPIC_SELECTOR, "topic", "Topic", catalogs.topics().to_vec(), value)
	}

	/// The Country dropdown over the country catalog
	pub fn country(catalogs: &Catalogs, value: &str) -> Self {
		Self::new(
			COUNTRY_SELECTOR,
			"country",
			"Country",
			catalogs.countries().to_vec(),
			value,
		)
	}

	fn option(value: &str, selected: bool) -> String {
		let label = if value.is_empty() { ANY_LABEL } else { value };
		format!(
			"<option value=\"{}\"{}>{}</option>",
			encode_double_quoted_attribute(value),
			if selected { " selected" } else { "" },
			encode_text(label)
		)
	}
}

impl Component for Dropdown {
	fn name(&self) -> &'static str {
		"Dropdown"
	}

	fn render(&self) -> String {
		let mut options: String = self
			.options
			.iter()
			.map(|option| Self::option(option, *option == self.value))
			.collect();
		if !self.options.contains(&self.value) {
			options.push_str(&Self::option(&self.value, true));
		}
		format!(
			"<div class=\"col-md-6 align-self-center\"><h5>{}</h5><select{}>{}</select></div>",
			encode_text(&self.label),
			self.render_attributes(),
			options
		)
	}

	fn classes(&self) -> Vec<String> {
		vec!["custom-select".to_string(), "dash-dropdown".to_string()]
	}

	fn attributes(&self) -> IndexMap<String, String> {
		let mut attrs = IndexMap::new();
		attrs.insert("id".to_string(), self.id.clone());
		attrs.insert("name".to_string(), self.field.clone());
		attrs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_topic_dropdown_marks_selection() {
		let catalogs = Catalogs::default();
		let html = Dropdown::topic(&catalogs, "mfn tariff").render();

		assert!(html.starts_with("<div class=\"col-md-6 align-self-center\"><h5>Topic</h5>"));
		assert!(html.contains(
			"<select class=\"custom-select dash-dropdown\" id=\"dropdown_1\" name=\"topic\">"
		));
		assert!(html.contains("<option value=\"mfn tariff\" selected>mfn tariff</option>"));
		assert_eq!(html.matches(" selected").count(), 1);
		assert_eq!(html.matches("<option").count(), catalogs.topics().len());
	}

	#[rstest]
	fn test_country_dropdown_has_empty_choice_first() {
		let catalogs = Catalogs::default();
		let html = Dropdown::country(&catalogs, "").render();
		assert!(html.contains("<h5>Country</h5>"));
		assert!(html.contains("name=\"country\"><option value=\"\" selected>(any)</option>"));
	}

	#[rstest]
	fn test_unknown_value_is_kept_and_escaped() {
		let dropdown = Dropdown::new("d", "f", "L", vec!["a".into()], "<x>");
		let html = dropdown.render();
		assert!(html.contains(" selected>&lt;x&gt;</option>"));
	}
}
