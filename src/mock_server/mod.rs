//! Mock Cloud Foundry API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the V3 API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing: paginated lists with working `next` links,
//! creates that show up in later lists, and deletes that answer with a job.
//!
//! # Example
//!
//! ```ignore
//! use cfapi::mock_server::{Fixtures, MockServer};
//! use cfapi::CfClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await.unwrap();
//!     let client = CfClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let app = client.apps().get(Fixtures::APP_WEB).await.unwrap();
//!     assert_eq!(app.name, "web");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
