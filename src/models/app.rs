//! Application model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metadata, ToOneRelationship};
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource, Update};

/// A Cloud Foundry application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub guid: String,
    pub name: String,

    /// Desired state, `STARTED` or `STOPPED`.
    pub state: AppState,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub lifecycle: Option<Lifecycle>,

    #[serde(default)]
    pub relationships: AppRelationships,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

impl App {
    /// Guid of the space the app lives in.
    pub fn space_guid(&self) -> Option<&str> {
        self.relationships.space.guid()
    }

    /// Whether the app is meant to be running.
    pub fn is_started(&self) -> bool {
        self.state == AppState::Started
    }
}

/// Desired app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Started,
    Stopped,
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => f.write_str("STARTED"),
            Self::Stopped => f.write_str("STOPPED"),
        }
    }
}

/// Lifecycle (buildpack, cnb or docker) the app is staged with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    #[serde(rename = "type")]
    pub lifecycle_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Relationships of an app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppRelationships {
    #[serde(default)]
    pub space: ToOneRelationship,
}

/// Parameters for creating an app.
#[derive(Debug, Clone, Serialize)]
pub struct AppCreate {
    pub name: String,
    pub relationships: AppRelationships,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl AppCreate {
    /// Create parameters for an app named `name` in `space_guid`.
    pub fn new(name: impl Into<String>, space_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: AppRelationships {
                space: ToOneRelationship::to(space_guid),
            },
            environment_variables: None,
            lifecycle: None,
            metadata: None,
        }
    }
}

/// Parameters for updating an app.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Resource for App {
    const KIND: &'static str = "app";
    const PATH: &'static str = "apps";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for App {
    type Params = AppCreate;
}

impl Update for App {
    type Params = AppUpdate;
}

impl Delete for App {}
