//! CSV loading
//!
//! The dataset is read exactly once at process start. Any failure here is
//! fatal: the caller is expected to abort startup.

use crate::error::{DataError, Result};
use crate::record::{CAT_COLUMN, COUNTRY_COLUMN, Cell, Row, Table};
use indexmap::IndexMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads the dataset from a CSV file on disk
///
/// # Errors
///
/// Returns [`DataError::Open`] if the file cannot be opened,
/// [`DataError::Csv`] if it is malformed and [`DataError::MissingColumn`] if
/// the `Cat` or `Country` header is absent.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Table> {
	let path = path.as_ref();
	let file = File::open(path).map_err(|source| DataError::Open {
		path: path.to_path_buf(),
		source,
	})?;

	let table = read_csv(file)?;
	tracing::info!(
		path = %path.display(),
		rows = table.len(),
		columns = table.columns().len(),
		"Loaded dataset"
	);
	Ok(table)
}

/// Reads the dataset from any CSV source
///
/// Duplicate headers are disambiguated with a `.N` suffix so that no column is
/// silently dropped.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
	let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

	let columns = dedupe_headers(csv_reader.headers()?.iter());
	let cat_index = position(&columns, CAT_COLUMN)?;
	let country_index = position(&columns, COUNTRY_COLUMN)?;

	let mut rows = Vec::new();
	for record in csv_reader.records() {
		let record = record?;
		let mut extra = IndexMap::with_capacity(columns.len().saturating_sub(2));
		for (index, (name, field)) in columns.iter().zip(record.iter()).enumerate() {
			if index == cat_index || index == country_index {
				continue;
			}
			extra.insert(name.clone(), Cell::parse(field));
		}

		let cat = record.get(cat_index).unwrap_or_default();
		let country = record.get(country_index).unwrap_or_default();
		rows.push(Row::from_parts(cat, country, extra));
	}

	Ok(Table::new(columns, rows))
}

fn position(columns: &[String], name: &str) -> Result<usize> {
	columns
		.iter()
		.position(|c| c == name)
		.ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
	let mut columns: Vec<String> = Vec::new();
	for header in headers {
		let mut name = header.to_string();
		let mut suffix = 1;
		while columns.contains(&name) {
			name = format!("{}.{}", header, suffix);
			suffix += 1;
		}
		columns.push(name);
	}
	columns
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_read_csv_keeps_order_and_types() {
		let data = "Symbol,Cat,Country,Year\nWT/TPR/1,mfn tariff,KEN,2019\nWT/TPR/2,customs procedures,BRA,\n";
		let table = read_csv(data.as_bytes()).unwrap();

		assert_eq!(table.columns(), &["Symbol", "Cat", "Country", "Year"]);
		assert_eq!(table.len(), 2);
		assert_eq!(table.rows()[0].cat(), "mfn tariff");
		assert_eq!(table.rows()[0].extra()["Year"], Cell::integer(2019));
		assert_eq!(table.rows()[1].country(), "BRA");
		assert_eq!(table.rows()[1].extra()["Year"], Cell::Empty);
	}

	#[rstest]
	fn test_read_csv_carries_numeric_text_unchanged() {
		let data = "Cat,Country,Code,Rate,Id\nwto,BRA,007,1.50,12345678901234567890\n";
		let table = read_csv(data.as_bytes()).unwrap();
		let row = &table.rows()[0];

		let rendered: Vec<String> = ["Code", "Rate", "Id"]
			.iter()
			.map(|column| row.value(column).unwrap().to_string())
			.collect();
		assert_eq!(rendered, vec!["007", "1.50", "12345678901234567890"]);
		assert_eq!(row.extra()["Code"].as_f64(), Some(7.0));
	}

	#[rstest]
	#[case("Country,Year\nBRA,2019\n", "Cat")]
	#[case("Cat,Year\nwto,2019\n", "Country")]
	fn test_read_csv_missing_required_column(#[case] data: &str, #[case] missing: &str) {
		let err = read_csv(data.as_bytes()).unwrap_err();
		match err {
			DataError::MissingColumn(name) => assert_eq!(name, missing),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	fn test_read_csv_ragged_rows_are_rejected() {
		let data = "Cat,Country\nwto,BRA,extra\n";
		assert!(matches!(read_csv(data.as_bytes()), Err(DataError::Csv(_))));
	}

	#[rstest]
	fn test_dedupe_headers() {
		let columns = dedupe_headers(["Cat", "Note", "Country", "Note", "Note"].into_iter());
		assert_eq!(columns, vec!["Cat", "Note", "Country", "Note.1", "Note.2"]);
	}

	#[rstest]
	fn test_load_csv_missing_file() {
		let err = load_csv("/nonexistent/tpr-data.csv").unwrap_err();
		assert!(matches!(err, DataError::Open { .. }));
	}
}
