//! Organization model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metadata, ToOneRelationship};
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource, Update};

/// A Cloud Foundry organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub guid: String,
    pub name: String,

    /// Suspended organizations are read-only for non-admins.
    #[serde(default)]
    pub suspended: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub relationships: OrganizationRelationships,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

/// Relationships of an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationRelationships {
    #[serde(default)]
    pub quota: ToOneRelationship,
}

/// Parameters for creating an organization.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl OrganizationCreate {
    /// Create parameters for an organization named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suspended: None,
            metadata: None,
        }
    }
}

/// Parameters for updating an organization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Resource for Organization {
    const KIND: &'static str = "organization";
    const PATH: &'static str = "organizations";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for Organization {
    type Params = OrganizationCreate;
}

impl Update for Organization {
    type Params = OrganizationUpdate;
}

impl Delete for Organization {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_deserialize_minimal() {
        let org: Organization = serde_json::from_value(serde_json::json!({
            "guid": "24637893-3b77-489d-bb79-8466f0d88b52",
            "name": "my-organization"
        }))
        .unwrap();

        assert_eq!(org.name, "my-organization");
        assert!(!org.suspended);
        assert!(org.relationships.quota.guid().is_none());
    }
}
