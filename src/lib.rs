//! Cloud Foundry V3 API client library.
//!
//! A Rust library for the Cloud Foundry V3 REST API. Resource types
//! (apps, spaces, organizations, ...) describe where they live in the API,
//! and one generic [`ResourceClient`] provides get, list, create, update
//! and delete for all of them.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfapi::{AppCreate, CfClient, JobWaitOptions, ListFilter};
//!
//! #[tokio::main]
//! async fn main() -> cfapi::Result<()> {
//!     // Create client from environment variables
//!     let client = CfClient::from_env()?;
//!
//!     // List every app in a space, across all pages
//!     let apps = client
//!         .apps()
//!         .list_all(&ListFilter::new().space_guids(["space-guid"]))
//!         .await?;
//!     println!("Found {} apps", apps.len());
//!
//!     // Create an app; completes synchronously
//!     let created = client
//!         .apps()
//!         .create(&AppCreate::new("my-app", "space-guid"))
//!         .await?;
//!     if let Some(app) = created.into_immediate() {
//!         // Deletes are carried out by a job
//!         let deletion = client.apps().delete(&app.guid).await?;
//!         client.complete(deletion, JobWaitOptions::default()).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Two mechanisms do the protocol work:
//!
//! - [`Pager`] walks `pagination.next` links, one request at a time, either
//!   page by page or eagerly via [`ResourceClient::list_all`].
//! - [`resolve`](resolve::resolve) turns a mutating response into an
//!   [`AsyncOperation`]: the decoded resource, or the job id from a
//!   `Location: .../v3/jobs/{guid}` header.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CF_API_URL` (required) - API root, e.g. `https://api.example.org`
//! - `CF_ACCESS_TOKEN` (required) - OAuth access token (`cf oauth-token`)

pub mod cli;
mod client;
mod error;
mod filter;
mod jobs;
mod models;
pub mod output;
mod pager;
mod pagination;
pub mod resolve;
mod resource;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{CfClient, DEFAULT_PER_PAGE};
pub use error::{ApiError, CfError, ErrorDetail, Result};
pub use filter::ListFilter;
pub use jobs::JobWaitOptions;
pub use pager::Pager;
pub use pagination::{Included, Link, ListPage, PageCursor, Pagination, MAX_PER_PAGE};
pub use resolve::{AsyncOperation, JobId};
pub use resource::ResourceClient;

// Re-export traits
pub use traits::{Create, Delete, Resource, Update};

// Re-export models
pub use models::{
    // Shared
    Metadata,
    RelationshipData,
    ToOneRelationship,
    // Apps
    App,
    AppCreate,
    AppRelationships,
    AppState,
    AppUpdate,
    Lifecycle,
    // Spaces and organizations
    Organization,
    OrganizationCreate,
    OrganizationRelationships,
    OrganizationUpdate,
    Space,
    SpaceCreate,
    SpaceRelationships,
    SpaceUpdate,
    // Roles
    Role,
    RoleCreate,
    RoleRelationships,
    RoleType,
    // Routes
    Route,
    RouteCreate,
    RouteDestination,
    RouteDestinationApp,
    RouteRelationships,
    RouteUpdate,
    // Service credential bindings
    BindingRelationships,
    LastOperation,
    ServiceCredentialBinding,
    ServiceCredentialBindingCreate,
    ServiceCredentialBindingUpdate,
    // Jobs
    Job,
    JobState,
    JobWarning,
};
