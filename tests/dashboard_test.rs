//! Startup from a settings file through to rendered responses

use bytes::Bytes;
use clap::Parser;
use http::{Method, Request, StatusCode};
use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::TempDir;
use tpr_dashboard::cli::Cli;
use tpr_dashboard::prelude::*;
use tpr_dashboard::server::{EnvSource, Handler};

struct Deployment {
	_dir: TempDir,
	settings: Settings,
}

#[fixture]
fn deployment() -> Deployment {
	let dir = TempDir::new().unwrap();
	let data = dir.path().join("tpr.csv");
	let mut csv = std::fs::File::create(&data).unwrap();
	writeln!(csv, "Symbol,Cat,Country,Year").unwrap();
	writeln!(csv, "WT/TPR/S/1,customs procedures,BRA,2017").unwrap();
	writeln!(csv, "WT/TPR/S/2,mfn tariff,BDI#KEN#RWA#TZA#UGA,2019").unwrap();
	writeln!(csv, "WT/TPR/S/3,customs procedures,USA,2018").unwrap();

	let config = dir.path().join("tpr.toml");
	let mut toml = std::fs::File::create(&config).unwrap();
	writeln!(toml, "title = \"Trade Policy Reviews\"").unwrap();
	writeln!(toml, "data_path = {:?}", data.to_string_lossy()).unwrap();
	writeln!(toml, "\n[catalog]\ntopics = [\"\", \"customs procedures\", \"mfn tariff\"]").unwrap();

	let cli = Cli::parse_from(["tpr-dashboard", "--config", config.to_str().unwrap()]);
	let settings = cli
		.settings_with(EnvSource::from_vars(Vec::<(String, String)>::new()))
		.unwrap();
	Deployment { _dir: dir, settings }
}

async fn get(handler: &DashboardHandler, uri: &str) -> String {
	let request = Request::builder()
		.method(Method::GET)
		.uri(uri)
		.body(Bytes::new())
		.unwrap();
	let response = handler.handle(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	String::from_utf8(response.body().to_vec()).unwrap()
}

#[rstest]
#[tokio::test]
async fn test_configured_dashboard_serves_filtered_rows(deployment: Deployment) {
	let state = AppState::load(&deployment.settings).unwrap();
	assert_eq!(state.table().len(), 3);
	assert_eq!(state.catalogs().topics().len(), 3);

	let handler = DashboardHandler::new(state);
	let html = get(&handler, "/").await;
	assert!(html.contains("<title>Trade Policy Reviews</title>"));
	assert!(html.contains("<option value=\"mfn tariff\">"));

	let html = get(&handler, "/page-1?topic=customs+procedures&sort=-Year").await;
	let usa = html.find("WT/TPR/S/3").unwrap();
	let bra = html.find("WT/TPR/S/1").unwrap();
	assert!(usa < bra);
	assert!(!html.contains("WT/TPR/S/2"));
}

#[rstest]
fn test_missing_dataset_is_fatal(deployment: Deployment) {
	let settings = Settings {
		data_path: deployment.settings.data_path.with_file_name("absent.csv"),
		..deployment.settings.clone()
	};
	assert!(AppState::load(&settings).is_err());
}
