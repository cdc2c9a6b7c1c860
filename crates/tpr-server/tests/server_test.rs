//! Serving over a real socket

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tpr_data::{Catalogs, Row, Table};
use tpr_server::{AppState, DashboardHandler, HttpServer, ServerError, ShutdownCoordinator};

fn state() -> AppState {
	AppState::new(
		Table::from_rows(vec![Row::new("wto", "BRA"), Row::new("mfn tariff", "KEN")]),
		Catalogs::default(),
	)
}

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
	let mut stream = TcpStream::connect(addr).await.unwrap();
	let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", path);
	stream.write_all(request.as_bytes()).await.unwrap();
	let mut response = String::new();
	stream.read_to_string(&mut response).await.unwrap();
	response
}

#[tokio::test]
async fn test_serves_until_shutdown() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));

	let server = HttpServer::new(Arc::new(DashboardHandler::new(state())));
	let task = tokio::spawn(server.serve(listener, coordinator.clone()));

	let health = get(addr, "/health").await;
	assert!(health.starts_with("HTTP/1.1 200 OK"));
	assert!(health.ends_with(r#"{"status":"ok","rows":2}"#));

	let page = get(addr, "/page-3").await;
	assert!(page.contains("Oh cool, this is page 3!"));

	coordinator.shutdown();
	tokio::time::timeout(Duration::from_secs(5), task)
		.await
		.unwrap()
		.unwrap()
		.unwrap();
	assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
	let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = taken.local_addr().unwrap();
	let coordinator = ShutdownCoordinator::new(Duration::from_millis(10));

	let server = HttpServer::new(Arc::new(DashboardHandler::new(state())));
	let result = server.listen_with_shutdown(addr, coordinator).await;
	assert!(matches!(result, Err(ServerError::Bind { addr: failed, .. }) if failed == addr));
}
