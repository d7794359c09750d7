//! HTTP surface of the Vocalis worker

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod health;
mod runsync;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing};
use tower_http::trace::TraceLayer;
use vocalis_config::Config;
use vocalis_job::Orchestrator;
use vocalis_telemetry::metrics::{self, HTTP_REQUEST_DURATION};

pub use runsync::{PayloadError, parse_job};

/// Largest job body accepted, base64 audio included
pub const MAX_JOB_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server and its upstream clients from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream client cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let orchestrator = vocalis_job::build_orchestrator(config)?;
        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Build the server around an existing orchestrator
    pub fn with_orchestrator(config: &Config, orchestrator: Arc<Orchestrator>) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let request_duration = metrics::meter()
            .f64_histogram(HTTP_REQUEST_DURATION)
            .with_unit("s")
            .build();

        let state = runsync::RunSyncState {
            orchestrator,
            request_duration,
        };

        let mut app = Router::new().route(
            "/runsync",
            routing::post(runsync::runsync_handler)
                .layer(DefaultBodyLimit::max(MAX_JOB_BODY_BYTES))
                .with_state(state),
        );

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, routing::get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
