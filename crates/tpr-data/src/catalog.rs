//! Topic and Country selector choices
//!
//! The catalogs only populate the selectors. They are never validated against
//! the values that actually occur in the dataset, and the filter accepts
//! strings outside them.

use serde::{Deserialize, Serialize};

/// Built-in topic choices, in display order
///
/// The last entry was written upstream as two adjacent literals, the second
/// one empty, so it evaluates to a single string. It is kept as it evaluates
/// rather than as a separate empty topic. Catalogs supplied through
/// configuration can be checked with [`Catalogs::audit`].
pub const TOPIC_CATALOG: &[&str] = &[
	"economic environment",
	"investment regime",
	"customs procedures",
	"customs valuation",
	"rules of origin",
	"mfn tariff",
	"preferential tariffs",
	"import prohibitions, restrictions, and licensing",
	"anti-dumping",
	"safeguard",
	"standards and other technical requirements",
	"taxes, charges, and levies",
	"export prohibitions",
	"export subsidies",
	"export finance, insurance, and guarantees",
	"incentives",
	"competition policy and price controls",
	"government procurement",
	"intellectual property",
	"agriculture",
	"manufacturing",
	"services",
	"wto",
	"import prohibition",
	"sanitary and phytosanitary",
	"competition",
	"energy",
	"trade policy objectives",
	"trade agreements and arrangements",
	"bound",
	"agricultural",
	"state trading",
	"fisheries",
	"general framework",
	"tariff exemptions",
	"internal taxes",
	"legal framework",
	"other charges affecting imports",
	"mining and energy",
	"tariff bindings",
	"countervailing",
	"investment policy",
	"legal and institutional framework",
	"preferential agreements",
	"agriculture, forestry, and fisheries",
	"anti-dumping, countervailing, and safeguard measures",
	"export support and promotion",
	"registration, customs procedures and requirements",
	"other measures affecting imports",
];

/// Built-in country and country-group codes, in display order
///
/// The first entry is the empty string, meaning "no country filter".
pub const COUNTRY_CATALOG: &[&str] = &[
	"",
	"747#BWA#LSO#NAM#ZAF",
	"808",
	"AGO",
	"ALB",
	"ARE",
	"ARG",
	"ARM",
	"ATG#DMA#GRD#KNA#LCA#VCT",
	"AUS",
	"BDI#KEN#RWA#TZA#UGA",
	"BEN#BFA#CIV#GNB#MLI#NER#SEN#TGO",
	"BGD",
	"BHR",
	"BLZ",
	"BOL",
	"BRA",
	"BRB",
	"BRN",
	"CAF#CMR#COG#GAB#TCD",
	"CAN",
	"CHE#LIE",
	"CHL",
	"CHN",
	"COD",
	"COL",
	"CPV",
	"CRI",
	"DJI",
	"DOM",
	"EEC",
	"EGY",
	"FJI",
	"GEO",
	"GHA",
	"GIN",
	"GMB",
	"GTM",
	"GUY",
	"HKG",
	"HND",
	"HTI",
	"IDN",
	"IND",
	"ISL",
	"ISR",
	"JAM",
	"JOR",
	"JPN",
	"KGZ",
	"KHM",
	"KOR",
	"LKA",
	"MAC",
	"MAR",
	"MDA",
	"MDG",
	"MDV",
	"MEX",
	"MMR",
	"MNE",
	"MNG",
	"MOZ",
	"MRT",
	"MUS",
	"MWI",
	"MYS",
	"NGA",
	"NIC",
	"NOR",
	"NPL",
	"NZL",
	"OMN",
	"PAK",
	"PAN",
	"PER",
	"PHL",
	"PRY",
	"QAT",
	"RUS",
	"SAU",
	"SGP",
	"SLB",
	"SLE",
	"SLV",
	"SUR",
	"THA",
	"TON",
	"TPKM",
	"TUN",
	"TUR",
	"UKR",
	"URY",
	"USA",
	"VNM",
	"VUT",
	"ZMB",
];

/// A suspicious catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
	/// An empty topic, which would make the Topic filter match every row
	EmptyTopic {
		/// Position in the topic list
		index: usize,
	},
	/// The same value listed twice
	Duplicate {
		/// Which catalog (`"topics"` or `"countries"`)
		catalog: &'static str,
		/// Repeated value
		value: String,
	},
	/// Leading or trailing whitespace, which never matches a data value
	Whitespace {
		/// Which catalog (`"topics"` or `"countries"`)
		catalog: &'static str,
		/// Offending value
		value: String,
	},
}

impl std::fmt::Display for CatalogIssue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::EmptyTopic { index } => write!(f, "topic #{} is empty", index),
			Self::Duplicate { catalog, value } => {
				write!(f, "{} lists {:?} more than once", catalog, value)
			}
			Self::Whitespace { catalog, value } => {
				write!(f, "{} entry {:?} has surrounding whitespace", catalog, value)
			}
		}
	}
}

/// Catalog overrides as they appear in the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
	/// Replacement topic list
	pub topics: Option<Vec<String>>,
	/// Replacement country list
	pub countries: Option<Vec<String>>,
}

/// The pair of selector catalogs shared by every session
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
	topics: Vec<String>,
	countries: Vec<String>,
}

impl Default for Catalogs {
	fn default() -> Self {
		Self {
			topics: TOPIC_CATALOG.iter().map(|s| s.to_string()).collect(),
			countries: COUNTRY_CATALOG.iter().map(|s| s.to_string()).collect(),
		}
	}
}

impl Catalogs {
	/// Creates catalogs from explicit lists
	///
	/// The country list always begins with the empty "no filter" choice; it is
	/// inserted when missing.
	pub fn new(topics: Vec<String>, mut countries: Vec<String>) -> Self {
		if countries.first().is_none_or(|first| !first.is_empty()) {
			countries.retain(|c| !c.is_empty());
			countries.insert(0, String::new());
		}
		Self { topics, countries }
	}

	/// Applies settings overrides on top of the built-in lists
	pub fn from_config(config: &CatalogConfig) -> Self {
		let defaults = Self::default();
		Self::new(
			config.topics.clone().unwrap_or(defaults.topics),
			config.countries.clone().unwrap_or(defaults.countries),
		)
	}

	/// Topic choices in display order
	pub fn topics(&self) -> &[String] {
		&self.topics
	}

	/// Country choices in display order
	pub fn countries(&self) -> &[String] {
		&self.countries
	}

	/// Reports entries that look like data-entry mistakes
	///
	/// Nothing is corrected; the caller decides whether to log or reject.
	pub fn audit(&self) -> Vec<CatalogIssue> {
		let mut issues = Vec::new();

		for (index, topic) in self.topics.iter().enumerate() {
			if topic.is_empty() {
				issues.push(CatalogIssue::EmptyTopic { index });
			}
		}

		for (catalog, values) in [("topics", &self.topics), ("countries", &self.countries)] {
			for (index, value) in values.iter().enumerate() {
				if values[..index].contains(value) {
					issues.push(CatalogIssue::Duplicate {
						catalog,
						value: value.clone(),
					});
				}
				if !value.is_empty() && value.trim() != value {
					issues.push(CatalogIssue::Whitespace {
						catalog,
						value: value.clone(),
					});
				}
			}
		}

		issues
	}
}
