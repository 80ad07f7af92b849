//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{App, Job, Organization, Role, Route, ServiceCredentialBinding, Space};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn push_labels(lines: &mut Vec<String>, metadata: &crate::Metadata) {
    if metadata.labels.is_empty() {
        return;
    }
    let labels = metadata
        .labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Labels:         {}", labels));
}

impl PrettyPrint for App {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("App: {}", self.name));
        lines.push(format!("Guid:           {}", self.guid));
        lines.push(format!("State:          {}", self.state));

        if let Some(space) = self.space_guid() {
            lines.push(format!("Space:          {}", space));
        }

        if let Some(ref lifecycle) = self.lifecycle {
            lines.push(format!("Lifecycle:      {}", lifecycle.lifecycle_type));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIME_FORMAT)));
        }

        push_labels(&mut lines, &self.metadata);
        lines.join("\n")
    }
}

impl PrettyPrint for Space {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Space: {}", self.name));
        lines.push(format!("Guid:           {}", self.guid));

        if let Some(org) = self.organization_guid() {
            lines.push(format!("Organization:   {}", org));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIME_FORMAT)));
        }

        push_labels(&mut lines, &self.metadata);
        lines.join("\n")
    }
}

impl PrettyPrint for Organization {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Organization: {}", self.name));
        lines.push(format!("Guid:           {}", self.guid));

        if self.suspended {
            lines.push("Status:         suspended".to_string());
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIME_FORMAT)));
        }

        push_labels(&mut lines, &self.metadata);
        lines.join("\n")
    }
}

impl PrettyPrint for Route {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Route: {}", self.url));
        lines.push(format!("Guid:           {}", self.guid));

        if let Some(ref protocol) = self.protocol {
            lines.push(format!("Protocol:       {}", protocol));
        }

        let apps = self
            .destinations
            .iter()
            .map(|d| d.app.guid.as_str())
            .collect::<Vec<_>>();
        if !apps.is_empty() {
            lines.push(format!("Destinations:   {}", apps.join(", ")));
        }

        push_labels(&mut lines, &self.metadata);
        lines.join("\n")
    }
}

impl PrettyPrint for Role {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Role: {}", self.guid));
        lines.push(format!("Type:           {}", self.role_type.as_str()));

        if let Some(user) = self.relationships.user.guid() {
            lines.push(format!("User:           {}", user));
        }
        if let Some(org) = self.relationships.organization.guid() {
            lines.push(format!("Organization:   {}", org));
        }
        if let Some(space) = self.relationships.space.guid() {
            lines.push(format!("Space:          {}", space));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ServiceCredentialBinding {
    fn pretty_print(&self) -> String {
        let title = self.name.as_deref().unwrap_or(&self.guid);
        let mut lines = header(format!("Binding: {}", title));
        lines.push(format!("Guid:           {}", self.guid));
        lines.push(format!("Type:           {}", self.binding_type));

        if let Some(ref op) = self.last_operation {
            lines.push(format!("Last Operation: {} {}", op.operation_type, op.state));
        }

        push_labels(&mut lines, &self.metadata);
        lines.join("\n")
    }
}

impl PrettyPrint for Job {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Job: {}", self.guid));
        lines.push(format!("Operation:      {}", self.operation));
        lines.push(format!("State:          {:?}", self.state));

        for error in &self.errors {
            lines.push(format!("Error:          {} ({})", error.detail, error.title));
        }
        for warning in &self.warnings {
            lines.push(format!("Warning:        {}", warning.detail));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_pretty_print_format() {
        let app: App = serde_json::from_value(serde_json::json!({
            "guid": "app-1",
            "name": "my-app",
            "state": "STARTED",
            "relationships": { "space": { "data": { "guid": "space-1" } } },
            "metadata": { "labels": { "env": "prod" } }
        }))
        .unwrap();

        let output = app.pretty_print();
        assert!(output.starts_with("App: my-app"));
        assert!(output.contains("State:          STARTED"));
        assert!(output.contains("Space:          space-1"));
        assert!(output.contains("env=prod"));
    }

    #[test]
    fn test_job_pretty_print_lists_errors() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "guid": "job-1",
            "operation": "app.delete",
            "state": "FAILED",
            "errors": [{ "code": 1, "title": "CF-Boom", "detail": "it broke" }]
        }))
        .unwrap();

        let output = job.pretty_print();
        assert!(output.contains("State:          Failed"));
        assert!(output.contains("it broke (CF-Boom)"));
    }
}
