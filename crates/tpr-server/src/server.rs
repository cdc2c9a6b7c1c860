//! HTTP/1 server on hyper

use crate::error::{Result, ServerError};
use crate::handler::{Handler, internal_server_error};
use crate::shutdown::ShutdownCoordinator;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

/// HTTP server
pub struct HttpServer {
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	/// Create a new server with the given handler
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Binds `addr` and serves until `coordinator` signals shutdown
	///
	/// # Errors
	///
	/// Returns [`ServerError::Bind`] if the address cannot be bound.
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> Result<()> {
		let listener = TcpListener::bind(addr)
			.await
			.map_err(|source| ServerError::Bind { addr, source })?;
		self.serve(listener, coordinator).await
	}

	/// Serves connections from an already bound listener
	///
	/// On shutdown the listener is closed, open connections are asked to
	/// finish their current request, and any still running after the grace
	/// period are aborted.
	///
	/// # Errors
	///
	/// Returns [`ServerError::Io`] if the listener's address is unavailable.
	pub async fn serve(self, listener: TcpListener, coordinator: ShutdownCoordinator) -> Result<()> {
		let local_addr = listener.local_addr()?;
		tracing::info!(addr = %local_addr, "Server listening on http://{}", local_addr);

		let mut connections = JoinSet::new();
		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, remote_addr) = match result {
						Ok(accepted) => accepted,
						Err(err) => {
							tracing::warn!(%err, "Failed to accept connection");
							continue;
						}
					};
					let handler = self.handler.clone();
					let coordinator = coordinator.clone();
					connections.spawn(async move {
						if let Err(err) = Self::handle_connection(stream, remote_addr, handler, coordinator).await {
							tracing::debug!(%remote_addr, %err, "Error handling connection");
						}
					});
				}
				Some(_) = connections.join_next(), if !connections.is_empty() => {}
				_ = coordinator.wait() => {
					tracing::info!("Shutdown signal received, stopping server");
					break;
				}
			}
		}
		drop(listener);

		let grace = coordinator.grace_period();
		let drained = tokio::time::timeout(grace, async {
			while connections.join_next().await.is_some() {}
		})
		.await;
		if drained.is_err() {
			tracing::warn!(
				remaining = connections.len(),
				grace_secs = grace.as_secs(),
				"Grace period elapsed, aborting connections"
			);
			connections.abort_all();
		}

		tracing::info!("Server stopped");
		Ok(())
	}

	/// Serves HTTP/1 requests on one TCP connection
	///
	/// # Errors
	///
	/// Returns the protocol error that ended the connection, if any.
	pub async fn handle_connection(
		stream: TcpStream,
		remote_addr: SocketAddr,
		handler: Arc<dyn Handler>,
		coordinator: ShutdownCoordinator,
	) -> std::result::Result<(), hyper::Error> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr,
		};

		let conn = http1::Builder::new().serve_connection(io, service);
		tokio::pin!(conn);
		tokio::select! {
			result = conn.as_mut() => result,
			_ = coordinator.wait() => {
				conn.as_mut().graceful_shutdown();
				conn.await
			}
		}
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body = body.collect().await?.to_bytes();
			let request = http::Request::from_parts(parts, body);

			let method = request.method().clone();
			let path = request.uri().path().to_string();

			let response = match handler.handle(request).await {
				Ok(response) => response,
				Err(err) => {
					tracing::error!(%err, %method, path, "Request handler failed");
					internal_server_error()
				}
			};
			tracing::debug!(
				%remote_addr,
				%method,
				path,
				status = response.status().as_u16(),
				"Handled request"
			);

			Ok(response.map(Full::new))
		})
	}
}
