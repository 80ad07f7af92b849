//! E2E tests using the mock Cloud Foundry server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use cfapi::mock_server::{Fixtures, MockServer, MockState};
use cfapi::{
    App, AppCreate, AppState, AppUpdate, CfClient, JobWaitOptions, ListFilter, Metadata,
    Organization, PageCursor, Role, RoleCreate, RoleType, Space,
};

async fn start() -> (MockServer, CfClient) {
    let server = MockServer::start().await.expect("Failed to start mock server");
    let client = CfClient::new("test-token", server.url()).unwrap();
    (server, client)
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await.unwrap();
    let server2 = MockServer::start().await.unwrap();

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await.unwrap();
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::get(format!("{}/health", url)).await;
    assert!(result.is_err());
}

// =============================================================================
// Pagination Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_all_walks_every_page() {
    let (server, client) = start().await;
    let client = client.with_per_page(2);

    let apps = client.apps().list_all(&ListFilter::new()).await.unwrap();

    assert_eq!(apps.len(), 5);
    assert_eq!(apps[0].guid, Fixtures::APP_WEB);

    server.shutdown().await;
}

#[tokio::test]
async fn test_pager_reports_pages_and_stops() {
    let (server, client) = start().await;

    let filter = ListFilter::new();
    let mut pager = client.apps().pager(&filter, PageCursor::new(1, 2));

    let mut sizes = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        sizes.push(page.len());
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(pager.pages_fetched(), 3);
    assert!(pager.is_exhausted());
    assert!(pager.next_page().await.unwrap().is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_filters_apply_across_pages() {
    let (server, client) = start().await;
    let client = client.with_per_page(1);

    let apps = client
        .apps()
        .list_all(
            &ListFilter::new()
                .names(["web", "worker"])
                .space_guids([Fixtures::SPACE_PROD]),
        )
        .await
        .unwrap();

    let mut names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["web", "worker"]);
    assert!(apps
        .iter()
        .all(|a| a.space_guid() == Some(Fixtures::SPACE_PROD)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_label_selector_and_order_by() {
    let (server, client) = start().await;

    let page = client
        .apps()
        .list(
            &ListFilter::new()
                .label_selector("tier=frontend")
                .order_by("-guid"),
            PageCursor::default(),
        )
        .await
        .unwrap();

    let guids: Vec<&str> = page.iter().map(|a| a.guid.as_str()).collect();
    assert_eq!(
        guids,
        vec!["9b4f6c3d-2e5a-4b8c-9d0e-4f5a6b7c8d9e", Fixtures::APP_WEB]
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_roles_with_included_organizations() {
    let (server, client) = start().await;

    let (roles, included) = client
        .roles()
        .list_all_with_included(&ListFilter::new().include("organization"))
        .await
        .unwrap();

    assert_eq!(roles.len(), 2);
    let orgs: Vec<Organization> = included.get("organizations").unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].name, "acme");

    server.shutdown().await;
}

// =============================================================================
// Mutation Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_create_update_delete_app_workflow() {
    let (server, client) = start().await;
    let apps = client.apps();

    // Step 1: Create
    let app: App = apps
        .create(&AppCreate::new("api", Fixtures::SPACE_DEV))
        .await
        .unwrap()
        .into_immediate()
        .expect("create should finish inline");
    assert_eq!(app.state, AppState::Stopped);

    // Step 2: It shows up in a filtered lookup
    let found = apps.single(&ListFilter::new().names(["api"])).await.unwrap();
    assert_eq!(found.guid, app.guid);

    // Step 3: Update labels
    let update = AppUpdate {
        metadata: Some(Metadata::default().with_label("env", "staging")),
        ..Default::default()
    };
    let updated = apps
        .update(&app.guid, &update)
        .await
        .unwrap()
        .into_immediate()
        .unwrap();
    assert_eq!(updated.metadata.label("env"), Some("staging"));

    // Step 4: Delete goes through a job
    let deletion = apps.delete(&app.guid).await.unwrap();
    assert!(deletion.is_deferred());
    let job = client
        .wait_for_job(deletion.job_id().unwrap(), JobWaitOptions::default())
        .await
        .unwrap();
    assert_eq!(job.operation, "app.delete");

    // Step 5: Gone
    assert!(apps.get(&app.guid).await.unwrap_err().is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_deferred_create_completes_via_job() {
    let state = MockState::new()
        .with_resource("spaces", Fixtures::space(Fixtures::SPACE_DEV, "dev", Fixtures::ORG))
        .with_deferred_creates("roles");
    let server = MockServer::with_state(state).await.unwrap();
    let client = CfClient::new("test-token", server.url()).unwrap();

    let op = client
        .roles()
        .create(&RoleCreate::new(
            RoleType::SpaceDeveloper,
            Fixtures::USER,
            Fixtures::SPACE_DEV,
        ))
        .await
        .unwrap();
    assert!(op.is_deferred());

    let result = client.complete(op, JobWaitOptions::default()).await.unwrap();
    assert!(result.is_none());

    let roles: Vec<Role> = client.roles().list_all(&ListFilter::new()).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].relationships.space.guid(), Some(Fixtures::SPACE_DEV));

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_are_visible() {
    let (server, client) = start().await;

    server.state().write().await.insert(
        "spaces",
        Fixtures::space("space-new", "qa", Fixtures::ORG),
    );

    let space: Space = client.spaces().get("space-new").await.unwrap();
    assert_eq!(space.name, "qa");

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let (server, client) = start().await;

    let err = client.spaces().get("nonexistent").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Space not found"));

    server.shutdown().await;
}
