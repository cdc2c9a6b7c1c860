//! Property tests for the Topic/Country filter

use proptest::prelude::*;
use tpr_data::{Row, Table, filter};

fn arb_row() -> impl Strategy<Value = Row> {
	(
		prop::sample::select(vec![
			"customs procedures",
			"mfn tariff",
			"preferential tariffs",
			"wto",
			"",
		]),
		prop::sample::select(vec!["BRA", "USA", "KEN", "BDI#KEN#RWA#TZA#UGA", "CHE#LIE", ""]),
		0i64..5000,
	)
		.prop_map(|(cat, country, id)| Row::new(cat, country).with("Id", id))
}

fn arb_table() -> impl Strategy<Value = Table> {
	prop::collection::vec(arb_row(), 0..60).prop_map(Table::from_rows)
}

fn arb_needle() -> impl Strategy<Value = String> {
	prop::sample::select(vec!["", "tariff", "customs", "KEN", "BRA", "#", "LIE", "zzz", "T"])
		.prop_map(str::to_string)
}

/// Returns true if `sub` appears in `full` in order
fn is_subsequence(sub: &[Row], full: &[Row]) -> bool {
	let mut rest = full.iter();
	sub.iter().all(|row| rest.any(|candidate| candidate == row))
}

proptest! {
	#[test]
	fn vacuous_filter_is_identity(table in arb_table()) {
		let result = filter(&table, "", "").unwrap();
		prop_assert_eq!(result, table);
	}

	#[test]
	fn every_kept_row_matches_and_no_match_is_dropped(
		table in arb_table(),
		topic in arb_needle(),
		country in arb_needle(),
	) {
		let result = filter(&table, &topic, &country).unwrap();

		for row in result.rows() {
			prop_assert!(row.cat().contains(topic.as_str()));
			prop_assert!(row.country().contains(country.as_str()));
		}

		let expected = table
			.rows()
			.iter()
			.filter(|r| r.cat().contains(topic.as_str()) && r.country().contains(country.as_str()))
			.count();
		prop_assert_eq!(result.len(), expected);
	}

	#[test]
	fn filter_is_idempotent_and_order_preserving(
		table in arb_table(),
		topic in arb_needle(),
		country in arb_needle(),
	) {
		let once = filter(&table, &topic, &country).unwrap();
		let twice = filter(&once, &topic, &country).unwrap();

		prop_assert_eq!(&once, &twice);
		prop_assert_eq!(&filter(&table, &topic, &country).unwrap(), &once);
		prop_assert!(is_subsequence(once.rows(), table.rows()));
	}
}
