//! End-to-end rendering of full documents from query state

use rstest::{fixture, rstest};
use tpr_data::{Catalogs, Row, Table};
use tpr_pages::{ClientState, Dashboard};

#[fixture]
fn table() -> Table {
	Table::from_rows(vec![
		Row::new("customs procedures", "BRA").with("Year", 2017),
		Row::new("mfn tariff", "BDI#KEN#RWA#TZA#UGA").with("Year", 2019),
		Row::new("customs procedures", "USA").with("Year", 2018),
	])
}

fn query(raw: &[(&str, &str)]) -> Vec<(String, String)> {
	raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn body_rows(html: &str) -> usize {
	html.matches("<tr><td").count()
}

#[rstest]
fn test_default_selection_matches_nothing_in_sample(table: Table) {
	let catalogs = Catalogs::default();
	let html = Dashboard::new(&table, &catalogs).render_document(&ClientState::new("/"));

	assert!(html.contains("<option value=\"economic environment\" selected>"));
	assert_eq!(body_rows(&html), 0);
	assert!(html.contains("<a class=\"nav-link active\" id=\"page-1-link\""));
}

#[rstest]
#[case(&[("topic", "mfn tariff"), ("country", "KEN")], 1)]
#[case(&[("topic", "customs procedures")], 2)]
#[case(&[("topic", ""), ("country", "")], 3)]
#[case(&[("topic", "customs procedures"), ("filter[Year]", ">= 2018")], 1)]
fn test_reports_page_filters(table: Table, #[case] raw: &[(&str, &str)], #[case] rows: usize) {
	let catalogs = Catalogs::default();
	let client = ClientState::from_query("/page-1", &query(raw));
	let html = Dashboard::new(&table, &catalogs).render_document(&client);
	assert_eq!(body_rows(&html), rows);
}

#[rstest]
fn test_unknown_path_renders_not_found(table: Table) {
	let catalogs = Catalogs::default();
	let html = Dashboard::new(&table, &catalogs).render_document(&ClientState::new("/reports"));

	assert!(html.contains("404: Not found"));
	assert!(html.contains("The pathname /reports was not recognised..."));
	assert!(!html.contains("nav-link active"));
	assert!(!html.contains("id=\"table-container\""));
}

#[rstest]
fn test_toggle_query_opens_collapse(table: Table) {
	let catalogs = Catalogs::default();
	let client = ClientState::from_query("/page-3", &query(&[("open", "false"), ("toggle", "1")]));
	let html = Dashboard::new(&table, &catalogs).render_document(&client);

	assert!(html.contains("<div id=\"collapse\" class=\"collapse show\">"));
	assert!(html.contains("href=\"/page-3?open=true&amp;toggle=1\""));
	assert!(html.contains("<p>Oh cool, this is page 3!</p>"));
}

#[rstest]
fn test_open_collapse_survives_navigation(table: Table) {
	let catalogs = Catalogs::default();
	let client = ClientState::from_query("/page-3", &query(&[("open", "true")]));
	let html = Dashboard::new(&table, &catalogs).render_document(&client);

	assert!(html.contains("id=\"page-1-link\" href=\"/page-1?open=true\""));
	assert!(html.contains("id=\"page-2-link\" href=\"/page-2?open=true\""));
	assert!(html.contains("class=\"nav-link active\" id=\"page-3-link\" href=\"/page-3?open=true\""));

	let closed = Dashboard::new(&table, &catalogs).render_document(&ClientState::new("/page-3"));
	assert!(closed.contains("id=\"page-2-link\" href=\"/page-2\""));
}
