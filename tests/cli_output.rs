//! Tests for CLI output formatting.
//!
//! JSON output with `--json`, pretty-print output as default.

use cfapi::output::PrettyPrint;
use cfapi::{Organization, Role, Route, ServiceCredentialBinding, Space};

fn space() -> Space {
    serde_json::from_value(serde_json::json!({
        "guid": "space-1",
        "name": "dev",
        "created_at": "2024-01-10T09:05:00Z",
        "relationships": { "organization": { "data": { "guid": "org-1" } } },
        "metadata": { "labels": { "team": "core" }, "annotations": {} }
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_keeps_wire_shape() {
    let json = serde_json::to_value(space()).unwrap();

    assert_eq!(json["guid"], "space-1");
    assert_eq!(
        json["relationships"]["organization"]["data"]["guid"],
        "org-1"
    );
    assert_eq!(json["metadata"]["labels"]["team"], "core");
}

#[test]
fn test_json_output_for_list_is_array() {
    let spaces = vec![space(), space()];
    let output = serde_json::to_string_pretty(&spaces).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = space().pretty_print();
    assert!(serde_json::from_str::<serde_json::Value>(&output).is_err());
}

#[test]
fn test_space_pretty_print() {
    let output = space().pretty_print();

    assert!(output.starts_with("Space: dev"));
    assert!(output.contains("Organization:   org-1"));
    assert!(output.contains("Created:        2024-01-10 09:05:00 UTC"));
    assert!(output.contains("Labels:         team=core"));
}

#[test]
fn test_organization_pretty_print_shows_suspension() {
    let org: Organization = serde_json::from_value(serde_json::json!({
        "guid": "org-1",
        "name": "acme",
        "suspended": true
    }))
    .unwrap();

    let output = org.pretty_print();
    assert!(output.starts_with("Organization: acme"));
    assert!(output.contains("suspended"));
}

#[test]
fn test_route_pretty_print_lists_destinations() {
    let route: Route = serde_json::from_value(serde_json::json!({
        "guid": "route-1",
        "host": "web",
        "url": "web.apps.example.org",
        "protocol": "http",
        "destinations": [
            { "guid": "d1", "app": { "guid": "app-1" } },
            { "guid": "d2", "app": { "guid": "app-2" }, "port": 8080 }
        ]
    }))
    .unwrap();

    let output = route.pretty_print();
    assert!(output.starts_with("Route: web.apps.example.org"));
    assert!(output.contains("Destinations:   app-1, app-2"));
}

#[test]
fn test_role_pretty_print_shows_target() {
    let role: Role = serde_json::from_value(serde_json::json!({
        "guid": "role-1",
        "type": "space_developer",
        "relationships": {
            "user": { "data": { "guid": "user-1" } },
            "organization": { "data": null },
            "space": { "data": { "guid": "space-1" } }
        }
    }))
    .unwrap();

    let output = role.pretty_print();
    assert!(output.contains("Type:           space_developer"));
    assert!(output.contains("User:           user-1"));
    assert!(output.contains("Space:          space-1"));
    assert!(!output.contains("Organization:"));
}

#[test]
fn test_binding_pretty_print_falls_back_to_guid() {
    let binding: ServiceCredentialBinding = serde_json::from_value(serde_json::json!({
        "guid": "binding-1",
        "type": "app",
        "last_operation": { "type": "create", "state": "succeeded" }
    }))
    .unwrap();

    let output = binding.pretty_print();
    assert!(output.starts_with("Binding: binding-1"));
    assert!(output.contains("Last Operation: create succeeded"));
}
