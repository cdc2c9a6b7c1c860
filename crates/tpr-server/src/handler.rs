//! Request handling and routing

use crate::error::Result;
use crate::state::AppState;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use serde_json::{Value, json};
use tpr_pages::{ClientState, PageError, asset, dispatch_json};

/// Path of the callback endpoint
pub const CALLBACK_PATH: &str = "/_dash-update-component";
/// Path of the layout description
pub const LAYOUT_PATH: &str = "/_dash-layout";
/// Path of the health check
pub const HEALTH_PATH: &str = "/health";

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

/// Turns a buffered request into a response
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles one request
	async fn handle(&self, request: Request<Bytes>) -> Result<Response<Bytes>>;
}

/// Routes requests to the dashboard pages, callbacks and assets
#[derive(Debug, Clone)]
pub struct DashboardHandler {
	state: AppState,
}

impl DashboardHandler {
	/// Creates a handler over shared state
	pub fn new(state: AppState) -> Self {
		Self { state }
	}

	fn document(&self, request: &Request<Bytes>) -> Result<Response<Bytes>> {
		let path = request.uri().path();
		let pairs = query_pairs(request.uri().query());
		let client = ClientState::from_query(path, &pairs);
		tracing::debug!(path, page = ?client.nav.page(), "Rendering document");
		let html = self.state.dashboard().render_document(&client);
		respond(StatusCode::OK, HTML, html)
	}

	fn callback(&self, body: &[u8]) -> Result<Response<Bytes>> {
		match dispatch_json(&self.state.dashboard(), body) {
			Ok(response) => respond(StatusCode::OK, JSON, serde_json::to_vec(&response)?),
			Err(err) => {
				let status = match err {
					PageError::UnknownOutput(_) => StatusCode::NOT_FOUND,
					_ => StatusCode::BAD_REQUEST,
				};
				tracing::warn!(%err, status = status.as_u16(), "Rejected callback request");
				json_response(status, &json!({ "error": err.to_string() }))
			}
		}
	}

	fn health(&self) -> Result<Response<Bytes>> {
		json_response(
			StatusCode::OK,
			&json!({ "status": "ok", "rows": self.state.table().len() }),
		)
	}
}

#[async_trait]
impl Handler for DashboardHandler {
	async fn handle(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
		let path = request.uri().path();
		match (request.method(), path) {
			(&Method::POST, CALLBACK_PATH) => self.callback(request.body()),
			(_, CALLBACK_PATH) => method_not_allowed("POST"),
			(&Method::GET, HEALTH_PATH) => self.health(),
			(&Method::GET, LAYOUT_PATH) => json_response(StatusCode::OK, &self.state.dashboard().layout()),
			(&Method::GET, path) => match asset(path) {
				Some(asset) => respond(StatusCode::OK, asset.content_type, asset.body),
				None => self.document(&request),
			},
			_ => method_not_allowed("GET"),
		}
	}
}

/// Decodes a query string into ordered pairs
///
/// A query that fails to decode is treated as empty.
pub fn query_pairs(query: Option<&str>) -> Vec<(String, String)> {
	let Some(query) = query else {
		return Vec::new();
	};
	serde_urlencoded::from_str(query).unwrap_or_else(|err| {
		tracing::debug!(%err, query, "Ignoring undecodable query string");
		Vec::new()
	})
}

fn respond(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Result<Response<Bytes>> {
	Ok(Response::builder()
		.status(status)
		.header(CONTENT_TYPE, content_type)
		.body(body.into())?)
}

fn json_response(status: StatusCode, value: &Value) -> Result<Response<Bytes>> {
	respond(status, JSON, serde_json::to_vec(value)?)
}

fn method_not_allowed(allow: &str) -> Result<Response<Bytes>> {
	Ok(Response::builder()
		.status(StatusCode::METHOD_NOT_ALLOWED)
		.header(ALLOW, allow)
		.header(CONTENT_TYPE, JSON)
		.body(Bytes::from_static(br#"{"error":"Method not allowed"}"#))?)
}

/// Plain 500 response used when a handler fails
pub fn internal_server_error() -> Response<Bytes> {
	let mut response = Response::new(Bytes::from_static(br#"{"error":"Internal server error"}"#));
	*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
	response
		.headers_mut()
		.insert(CONTENT_TYPE, http::HeaderValue::from_static(JSON));
	response
}
