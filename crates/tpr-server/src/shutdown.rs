//! Shutdown coordination and OS signal handling

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Broadcasts a one-shot shutdown to the accept loop and every connection
///
/// The flag is sticky: waiting after [`shutdown`](Self::shutdown) has been
/// called returns immediately.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
	sender: Arc<watch::Sender<bool>>,
	grace_period: Duration,
}

impl ShutdownCoordinator {
	/// Creates a coordinator; connections get `grace_period` to finish
	pub fn new(grace_period: Duration) -> Self {
		let (sender, _) = watch::channel(false);
		Self {
			sender: Arc::new(sender),
			grace_period,
		}
	}

	/// Requests shutdown
	pub fn shutdown(&self) {
		self.sender.send_replace(true);
	}

	/// Returns true once shutdown has been requested
	pub fn is_shutdown(&self) -> bool {
		*self.sender.borrow()
	}

	/// Completes when shutdown has been requested
	pub async fn wait(&self) {
		let mut receiver = self.sender.subscribe();
		// The sender lives as long as `self`, so this only ends on shutdown.
		let _ = receiver.wait_for(|stopped| *stopped).await;
	}

	/// Grace period for in-flight connections
	pub fn grace_period(&self) -> Duration {
		self.grace_period
	}
}

/// Completes on SIGINT or SIGTERM (Ctrl-C elsewhere)
///
/// # Errors
///
/// Returns an error if the signal handlers cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<()> {
	#[cfg(unix)]
	{
		use tokio::signal::unix::{SignalKind, signal};

		let mut sigint = signal(SignalKind::interrupt())?;
		let mut sigterm = signal(SignalKind::terminate())?;

		tokio::select! {
			_ = sigint.recv() => {
				tracing::info!("Received SIGINT");
			}
			_ = sigterm.recv() => {
				tracing::info!("Received SIGTERM");
			}
		}
		Ok(())
	}

	#[cfg(not(unix))]
	{
		tokio::signal::ctrl_c().await?;
		tracing::info!("Received Ctrl-C");
		Ok(())
	}
}

/// Spawns a task that triggers `coordinator` on the first termination signal
pub fn spawn_signal_handler(coordinator: ShutdownCoordinator) {
	tokio::spawn(async move {
		if let Err(err) = shutdown_signal().await {
			tracing::error!(%err, "Failed to listen for shutdown signals");
			return;
		}
		tracing::info!("Shutting down gracefully");
		coordinator.shutdown();
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_wait_completes_after_shutdown() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		assert!(!coordinator.is_shutdown());

		let waiter = {
			let coordinator = coordinator.clone();
			tokio::spawn(async move { coordinator.wait().await })
		};
		tokio::task::yield_now().await;
		coordinator.shutdown();

		tokio::time::timeout(Duration::from_secs(1), waiter)
			.await
			.unwrap()
			.unwrap();
		assert!(coordinator.is_shutdown());
	}

	#[tokio::test]
	async fn test_wait_after_shutdown_returns_immediately() {
		let coordinator = ShutdownCoordinator::new(Duration::from_millis(10));
		coordinator.shutdown();
		tokio::time::timeout(Duration::from_millis(100), coordinator.wait())
			.await
			.unwrap();
		assert_eq!(coordinator.grace_period(), Duration::from_millis(10));
	}

	#[tokio::test]
	async fn test_signal_handler_spawn() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		spawn_signal_handler(coordinator.clone());
		tokio::time::sleep(Duration::from_millis(10)).await;
		assert!(!coordinator.is_shutdown());
	}
}
