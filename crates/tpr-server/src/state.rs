//! Process-wide read-only state

use crate::settings::Settings;
use std::sync::Arc;
use tpr_data::{Catalogs, DataError, Table, load_csv};
use tpr_pages::Dashboard;

/// Dataset, catalogs and title shared by every connection
///
/// Built once before the listener binds and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
	table: Arc<Table>,
	catalogs: Arc<Catalogs>,
	title: Arc<str>,
}

impl AppState {
	/// Creates state around an already loaded table
	pub fn new(table: Table, catalogs: Catalogs) -> Self {
		Self {
			table: Arc::new(table),
			catalogs: Arc::new(catalogs),
			title: Arc::from(tpr_pages::DEFAULT_TITLE),
		}
	}

	/// Overrides the title
	pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
		self.title = Arc::from(title.as_ref());
		self
	}

	/// Loads the dataset and catalogs named by `settings`
	///
	/// Suspect catalog entries are logged but do not stop startup.
	///
	/// # Errors
	///
	/// Returns [`DataError`] if the dataset cannot be loaded.
	pub fn load(settings: &Settings) -> Result<Self, DataError> {
		let table = load_csv(&settings.data_path)?;
		let catalogs = Catalogs::from_config(&settings.catalog);
		for issue in catalogs.audit() {
			tracing::warn!(%issue, "Suspect catalog entry");
		}
		tracing::info!(
			rows = table.len(),
			topics = catalogs.topics().len(),
			countries = catalogs.countries().len(),
			"Dashboard state ready"
		);
		Ok(Self::new(table, catalogs).with_title(&settings.title))
	}

	/// The loaded dataset
	pub fn table(&self) -> &Table {
		&self.table
	}

	/// Selector catalogs
	pub fn catalogs(&self) -> &Catalogs {
		&self.catalogs
	}

	/// A renderer over this state
	pub fn dashboard(&self) -> Dashboard<'_> {
		Dashboard::new(&self.table, &self.catalogs).with_title(&self.title)
	}
}
