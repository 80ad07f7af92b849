//! Test data fixtures for the mock server.
//!
//! Provides factory functions for realistic V3 resources, as JSON.

use serde_json::{json, Value};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    pub const ORG: &'static str = "8d6f6b0e-6a2b-4d2c-9a3e-0b1c2d3e4f50";
    pub const SPACE_DEV: &'static str = "1f3c9a6e-2b7d-4c8e-9f01-a2b3c4d5e6f7";
    pub const SPACE_PROD: &'static str = "5a7b9c1d-3e4f-4a6b-8c9d-0e1f2a3b4c5d";
    pub const APP_WEB: &'static str = "6e1c3f0a-9b2d-4e5f-8a7b-1c2d3e4f5a6b";
    pub const USER: &'static str = "b2c4d6e8-1a3c-4e5a-9b7d-f1e3d5c7b9a1";

    // =========================================================================
    // Organizations and spaces
    // =========================================================================

    /// Create an organization.
    pub fn organization(guid: &str, name: &str) -> Value {
        json!({
            "guid": guid,
            "name": name,
            "suspended": false,
            "created_at": "2024-01-10T09:00:00Z",
            "updated_at": "2024-01-10T09:00:00Z",
            "relationships": { "quota": { "data": null } },
            "metadata": { "labels": {}, "annotations": {} },
            "links": {}
        })
    }

    /// Create a space inside an organization.
    pub fn space(guid: &str, name: &str, org_guid: &str) -> Value {
        json!({
            "guid": guid,
            "name": name,
            "created_at": "2024-01-10T09:05:00Z",
            "updated_at": "2024-01-10T09:05:00Z",
            "relationships": { "organization": { "data": { "guid": org_guid } } },
            "metadata": { "labels": {}, "annotations": {} },
            "links": {}
        })
    }

    // =========================================================================
    // Apps
    // =========================================================================

    /// Create an app in a space.
    pub fn app(guid: &str, name: &str, space_guid: &str, state: &str) -> Value {
        json!({
            "guid": guid,
            "name": name,
            "state": state,
            "created_at": "2024-02-01T12:00:00Z",
            "updated_at": "2024-02-01T12:00:00Z",
            "lifecycle": { "type": "buildpack", "data": { "buildpacks": [], "stack": "cflinuxfs4" } },
            "relationships": { "space": { "data": { "guid": space_guid } } },
            "metadata": { "labels": {}, "annotations": {} },
            "links": {}
        })
    }

    /// Create an app carrying one label.
    pub fn labeled_app(guid: &str, name: &str, space_guid: &str, key: &str, value: &str) -> Value {
        let mut app = Self::app(guid, name, space_guid, "STARTED");
        app["metadata"]["labels"][key] = json!(value);
        app
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// Create an organization-level role.
    pub fn org_role(guid: &str, role_type: &str, user_guid: &str, org_guid: &str) -> Value {
        json!({
            "guid": guid,
            "type": role_type,
            "created_at": "2024-01-11T08:00:00Z",
            "updated_at": "2024-01-11T08:00:00Z",
            "relationships": {
                "user": { "data": { "guid": user_guid } },
                "organization": { "data": { "guid": org_guid } },
                "space": { "data": null }
            },
            "links": {}
        })
    }

    /// Create a space-level role.
    pub fn space_role(guid: &str, role_type: &str, user_guid: &str, space_guid: &str) -> Value {
        json!({
            "guid": guid,
            "type": role_type,
            "created_at": "2024-01-11T08:00:00Z",
            "updated_at": "2024-01-11T08:00:00Z",
            "relationships": {
                "user": { "data": { "guid": user_guid } },
                "organization": { "data": null },
                "space": { "data": { "guid": space_guid } }
            },
            "links": {}
        })
    }

    // =========================================================================
    // Jobs
    // =========================================================================

    /// Create a job in the given state (`PROCESSING`, `COMPLETE`, `FAILED`).
    pub fn job(guid: &str, operation: &str, state: &str) -> Value {
        json!({
            "guid": guid,
            "operation": operation,
            "state": state,
            "errors": [],
            "warnings": [],
            "links": {}
        })
    }

    /// Create a failed job with one error.
    pub fn failed_job(guid: &str, operation: &str, detail: &str) -> Value {
        let mut job = Self::job(guid, operation, "FAILED");
        job["errors"] = json!([{ "code": 10008, "title": "CF-UnprocessableEntity", "detail": detail }]);
        job
    }

    /// Create a default test scenario.
    ///
    /// One organization with two spaces, five apps, and roles for one user.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A pre-configured set of test data.
pub struct DefaultScenario {
    pub organizations: Vec<Value>,
    pub spaces: Vec<Value>,
    pub apps: Vec<Value>,
    pub roles: Vec<Value>,
}

impl DefaultScenario {
    fn new() -> Self {
        let apps = vec![
            Fixtures::labeled_app(Fixtures::APP_WEB, "web", Fixtures::SPACE_DEV, "tier", "frontend"),
            Fixtures::app(
                "7f2d4a1b-0c3e-4f6a-9b8c-2d3e4f5a6b7c",
                "worker",
                Fixtures::SPACE_DEV,
                "STARTED",
            ),
            Fixtures::app(
                "8a3e5b2c-1d4f-4a7b-8c9d-3e4f5a6b7c8d",
                "scheduler",
                Fixtures::SPACE_DEV,
                "STOPPED",
            ),
            Fixtures::labeled_app(
                "9b4f6c3d-2e5a-4b8c-9d0e-4f5a6b7c8d9e",
                "web",
                Fixtures::SPACE_PROD,
                "tier",
                "frontend",
            ),
            Fixtures::app(
                "0c5a7d4e-3f6b-4c9d-8e1f-5a6b7c8d9e0f",
                "worker",
                Fixtures::SPACE_PROD,
                "STARTED",
            ),
        ];

        Self {
            organizations: vec![Fixtures::organization(Fixtures::ORG, "acme")],
            spaces: vec![
                Fixtures::space(Fixtures::SPACE_DEV, "dev", Fixtures::ORG),
                Fixtures::space(Fixtures::SPACE_PROD, "prod", Fixtures::ORG),
            ],
            apps,
            roles: vec![
                Fixtures::org_role(
                    "c3d5e7f9-2b4d-4f6b-8a0c-e2f4a6c8e0b2",
                    "organization_manager",
                    Fixtures::USER,
                    Fixtures::ORG,
                ),
                Fixtures::space_role(
                    "d4e6f8a0-3c5e-4a7c-9b1d-f3a5b7d9f1c3",
                    "space_developer",
                    Fixtures::USER,
                    Fixtures::SPACE_PROD,
                ),
            ],
        }
    }

    /// The scenario as `(collection, resources)` pairs.
    pub fn collections(self) -> Vec<(&'static str, Vec<Value>)> {
        vec![
            ("organizations", self.organizations),
            ("spaces", self.spaces),
            ("apps", self.apps),
            ("roles", self.roles),
        ]
    }
}
