//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chat_api::{create_app, create_app_state, run_server};
use chat_common::AppConfig;
use chat_service::{EvictionSweeper, ServiceContext, SweepReport, SweeperConfig};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Header carrying the caller's participant name
pub const USER_HEADER: &str = "User";

/// Test server instance that manages lifecycle
///
/// Runs the real application on an ephemeral port with in-memory storage.
/// The sweeper is not spawned; tests drive it with [`TestServer::sweep`].
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    context: Arc<ServiceContext>,
    sweeper_config: SweeperConfig,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let mut sweeper_config = SweeperConfig::from(&config.presence);
        sweeper_config.announce_backoff = Duration::from_millis(1);

        // Create app state
        let state = create_app_state(config).await?;
        let context = state.shared_context();

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            run_server(listener, app, shutdown).await.ok();
        });

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            context,
            sweeper_config,
            shutdown: Some(shutdown_tx),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request as a participant
    pub async fn get_as(&self, path: &str, user: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).header(USER_HEADER, user).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with JSON body as a participant
    pub async fn post_as<T: Serialize>(&self, path: &str, user: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(USER_HEADER, user)
            .json(body)
            .send()
            .await?)
    }

    /// Send a heartbeat as a participant
    pub async fn heartbeat(&self, user: &str) -> Result<Response> {
        let url = format!("{}/status", self.base_url());
        Ok(self.client.post(&url).header(USER_HEADER, user).send().await?)
    }

    /// Run one eviction sweep against the server's storage.
    ///
    /// `threshold` overrides the inactivity threshold so tests need not wait.
    pub async fn sweep(&self, threshold: Duration) -> Result<SweepReport> {
        let config = SweeperConfig {
            inactivity_threshold: threshold,
            ..self.sweeper_config.clone()
        };
        let report = EvictionSweeper::new(Arc::clone(&self.context), config)
            .sweep_once()
            .await?;
        Ok(report)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Create a test configuration (in-memory storage, ephemeral port)
pub fn test_config() -> AppConfig {
    AppConfig::in_memory()
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
