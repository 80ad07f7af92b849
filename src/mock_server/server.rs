//! Mock Cloud Foundry API server.
//!
//! Provides an axum-based HTTP server that simulates the V3 API.

use std::io;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Cloud Foundry API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API: creates, updates and deletes are visible to later
/// requests, and lists are paginated with real `next` links.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start() -> io::Result<Self> {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> io::Result<Self> {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> io::Result<Self> {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);

        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock server stopped");
            }
        });

        Ok(Self {
            url,
            handle,
            state: shared_state,
        })
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `CfClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();
        for (collection, resources) in scenario.collections() {
            for resource in resources {
                state.insert(collection, resource);
            }
        }
        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route(
                "/v3/:collection",
                get(handlers::list_resources).post(handlers::create_resource),
            )
            .route(
                "/v3/:collection/:guid",
                get(handlers::get_resource)
                    .patch(handlers::update_resource)
                    .delete(handlers::delete_resource),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::{App, CfClient, ListFilter, PageCursor};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await.unwrap();

        let response = reqwest::get(format!("{}/health", server.url()))
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_unknown_collection() {
        let router = MockServer::create_router(MockState::new().shared());

        let response = router
            .oneshot(Request::get("/v3/widgets").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["title"], "CF-NotFound");
    }

    #[tokio::test]
    async fn test_get_app_with_client() {
        let server = MockServer::start().await.unwrap();
        let client = CfClient::new("test-token", server.url()).unwrap();

        let app = client
            .apps()
            .get(Fixtures::APP_WEB)
            .await
            .expect("Failed to get app");

        assert_eq!(app.name, "web");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_apps_page_with_client() {
        let server = MockServer::start().await.unwrap();
        let client = CfClient::new("test-token", server.url()).unwrap();

        let page = client
            .resource::<App>()
            .list(&ListFilter::new(), PageCursor::new(1, 2))
            .await
            .expect("Failed to list apps");

        assert_eq!(page.len(), 2);
        assert!(page.has_more());
        assert_eq!(page.pagination.total_results, 5);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await.unwrap();
        let client = CfClient::new("test-token", server.url()).unwrap();

        let err = client.apps().get("nonexistent").await.unwrap_err();
        assert!(err.is_not_found());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = MockState::new().with_required_token("secret");
        let server = MockServer::with_state(state).await.unwrap();

        let wrong = CfClient::new("other", server.url()).unwrap();
        let err = wrong.apps().list(&ListFilter::new(), PageCursor::default()).await;
        assert_eq!(err.unwrap_err().status(), Some(401));

        let right = CfClient::new("bearer secret", server.url()).unwrap();
        let page = right
            .apps()
            .list(&ListFilter::new(), PageCursor::default())
            .await
            .unwrap();
        assert!(page.is_empty());

        server.shutdown().await;
    }
}
