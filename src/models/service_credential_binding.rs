//! Service credential binding model.
//!
//! Creating or deleting an `app` binding to a managed service instance is
//! carried out by a job; user-provided instances bind synchronously.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metadata, ToOneRelationship};
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource, Update};

/// A binding of a service instance to an app (`app`) or a service key (`key`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCredentialBinding {
    pub guid: String,

    #[serde(default)]
    pub name: Option<String>,

    /// `app` or `key`.
    #[serde(rename = "type")]
    pub binding_type: String,

    #[serde(default)]
    pub last_operation: Option<LastOperation>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub relationships: BindingRelationships,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

/// Last operation performed on a binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastOperation {
    /// `create` or `delete`.
    #[serde(rename = "type")]
    pub operation_type: String,
    /// `initial`, `in progress`, `succeeded` or `failed`.
    pub state: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Relationships of a binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<ToOneRelationship>,
    #[serde(default)]
    pub service_instance: ToOneRelationship,
}

/// Parameters for creating a binding.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCredentialBindingCreate {
    #[serde(rename = "type")]
    pub binding_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub relationships: BindingRelationships,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl ServiceCredentialBindingCreate {
    /// Bind `service_instance_guid` to `app_guid`.
    pub fn app(service_instance_guid: impl Into<String>, app_guid: impl Into<String>) -> Self {
        Self {
            binding_type: "app".to_string(),
            name: None,
            relationships: BindingRelationships {
                app: Some(ToOneRelationship::to(app_guid)),
                service_instance: ToOneRelationship::to(service_instance_guid),
            },
            parameters: None,
        }
    }

    /// Create a service key named `name` for `service_instance_guid`.
    pub fn key(service_instance_guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            binding_type: "key".to_string(),
            name: Some(name.into()),
            relationships: BindingRelationships {
                app: None,
                service_instance: ToOneRelationship::to(service_instance_guid),
            },
            parameters: None,
        }
    }
}

/// Parameters for updating a binding (metadata only).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceCredentialBindingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Resource for ServiceCredentialBinding {
    const KIND: &'static str = "service credential binding";
    const PATH: &'static str = "service_credential_bindings";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for ServiceCredentialBinding {
    type Params = ServiceCredentialBindingCreate;
}

impl Update for ServiceCredentialBinding {
    type Params = ServiceCredentialBindingUpdate;
}

impl Delete for ServiceCredentialBinding {}
