//! Role model.
//!
//! Roles bind a user to an organization or a space. Listing roles with
//! `include=user,organization,space` embeds the related resources in the
//! response's `included` block.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ToOneRelationship;
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource};

/// A role assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub guid: String,

    /// Role type, e.g. `organization_manager` or `space_developer`.
    #[serde(rename = "type")]
    pub role_type: RoleType,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub relationships: RoleRelationships,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

/// Role types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    OrganizationUser,
    OrganizationAuditor,
    OrganizationManager,
    OrganizationBillingManager,
    SpaceAuditor,
    SpaceDeveloper,
    SpaceManager,
    SpaceSupporter,
}

impl RoleType {
    /// Whether this role is scoped to a space (rather than an organization).
    pub fn is_space_role(&self) -> bool {
        matches!(
            self,
            Self::SpaceAuditor | Self::SpaceDeveloper | Self::SpaceManager | Self::SpaceSupporter
        )
    }

    /// Wire name, as used in `types` filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganizationUser => "organization_user",
            Self::OrganizationAuditor => "organization_auditor",
            Self::OrganizationManager => "organization_manager",
            Self::OrganizationBillingManager => "organization_billing_manager",
            Self::SpaceAuditor => "space_auditor",
            Self::SpaceDeveloper => "space_developer",
            Self::SpaceManager => "space_manager",
            Self::SpaceSupporter => "space_supporter",
        }
    }
}

/// Relationships of a role. Exactly one of `organization`/`space` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRelationships {
    #[serde(default)]
    pub user: ToOneRelationship,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub organization: ToOneRelationship,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub space: ToOneRelationship,
}

fn is_unset(rel: &ToOneRelationship) -> bool {
    rel.data.is_none()
}

/// Parameters for creating a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleCreate {
    #[serde(rename = "type")]
    pub role_type: RoleType,
    pub relationships: RoleRelationships,
}

impl RoleCreate {
    /// Grant `role_type` to `user_guid` in a space or organization,
    /// depending on the role type.
    pub fn new(
        role_type: RoleType,
        user_guid: impl Into<String>,
        target_guid: impl Into<String>,
    ) -> Self {
        let target = ToOneRelationship::to(target_guid);
        let (organization, space) = if role_type.is_space_role() {
            (ToOneRelationship::default(), target)
        } else {
            (target, ToOneRelationship::default())
        };

        Self {
            role_type,
            relationships: RoleRelationships {
                user: ToOneRelationship::to(user_guid),
                organization,
                space,
            },
        }
    }
}

impl Resource for Role {
    const KIND: &'static str = "role";
    const PATH: &'static str = "roles";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for Role {
    type Params = RoleCreate;
}

impl Delete for Role {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialize() {
        let role: Role = serde_json::from_value(serde_json::json!({
            "guid": "40557c70-d1bd-4976-a2ab-a85f5e882418",
            "type": "organization_auditor",
            "relationships": {
                "user": { "data": { "guid": "user-1" } },
                "organization": { "data": { "guid": "org-1" } },
                "space": { "data": null }
            }
        }))
        .unwrap();

        assert_eq!(role.role_type, RoleType::OrganizationAuditor);
        assert!(!role.role_type.is_space_role());
        assert_eq!(role.relationships.organization.guid(), Some("org-1"));
        assert_eq!(role.relationships.space.guid(), None);
    }

    #[test]
    fn test_space_role_create_targets_space() {
        let body =
            serde_json::to_value(RoleCreate::new(RoleType::SpaceDeveloper, "user-1", "space-1"))
                .unwrap();

        assert_eq!(body["type"], "space_developer");
        assert_eq!(body["relationships"]["space"]["data"]["guid"], "space-1");
        assert!(body["relationships"].get("organization").is_none());
    }

    #[test]
    fn test_org_role_create_targets_org() {
        let body = serde_json::to_value(RoleCreate::new(
            RoleType::OrganizationManager,
            "user-1",
            "org-1",
        ))
        .unwrap();

        assert_eq!(body["relationships"]["organization"]["data"]["guid"], "org-1");
        assert!(body["relationships"].get("space").is_none());
        assert_eq!(RoleType::OrganizationManager.as_str(), "organization_manager");
    }
}
