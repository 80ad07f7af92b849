//! Space model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metadata, ToOneRelationship};
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource, Update};

/// A space inside an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub guid: String,
    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub relationships: SpaceRelationships,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

impl Space {
    /// Guid of the owning organization.
    pub fn organization_guid(&self) -> Option<&str> {
        self.relationships.organization.guid()
    }
}

/// Relationships of a space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpaceRelationships {
    #[serde(default)]
    pub organization: ToOneRelationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<ToOneRelationship>,
}

/// Parameters for creating a space.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceCreate {
    pub name: String,
    pub relationships: SpaceRelationships,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl SpaceCreate {
    /// Create parameters for a space named `name` in `organization_guid`.
    pub fn new(name: impl Into<String>, organization_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: SpaceRelationships {
                organization: ToOneRelationship::to(organization_guid),
                quota: None,
            },
            metadata: None,
        }
    }
}

/// Parameters for updating a space.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpaceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Resource for Space {
    const KIND: &'static str = "space";
    const PATH: &'static str = "spaces";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for Space {
    type Params = SpaceCreate;
}

impl Update for Space {
    type Params = SpaceUpdate;
}

impl Delete for Space {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_deserialize() {
        let space: Space = serde_json::from_value(serde_json::json!({
            "guid": "885735b5-aea4-4cf5-8e44-961af0e41920",
            "created_at": "2017-02-01T01:33:58Z",
            "updated_at": "2017-02-01T01:33:58Z",
            "name": "my-space",
            "relationships": {
                "organization": { "data": { "guid": "e00705b9-7b42-4561-ae97-2520399d2133" } },
                "quota": { "data": null }
            },
            "metadata": { "labels": {}, "annotations": {} },
            "links": {}
        }))
        .unwrap();

        assert_eq!(space.name, "my-space");
        assert_eq!(
            space.organization_guid(),
            Some("e00705b9-7b42-4561-ae97-2520399d2133")
        );
        assert_eq!(
            space.relationships.quota.as_ref().and_then(|q| q.guid()),
            None
        );
    }

    #[test]
    fn test_space_create_body() {
        let body = serde_json::to_value(SpaceCreate::new("dev", "org-guid")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "dev",
                "relationships": { "organization": { "data": { "guid": "org-guid" } } }
            })
        );
    }
}
