//! Route model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metadata, ToOneRelationship};
use crate::pagination::Link;
use crate::traits::{Create, Delete, Resource, Update};

/// A route mapping a host/path on a domain to apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub guid: String,

    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// `http` or `tcp`.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Fully qualified URL, e.g. `app.example.org/path`.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub destinations: Vec<RouteDestination>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub relationships: RouteRelationships,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

/// A destination (app process and port) a route sends traffic to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDestination {
    pub guid: String,
    pub app: RouteDestinationApp,
    #[serde(default)]
    pub port: Option<u16>,
}

/// App targeted by a route destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDestinationApp {
    pub guid: String,
    #[serde(default)]
    pub process: Option<serde_json::Value>,
}

/// Relationships of a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRelationships {
    #[serde(default)]
    pub space: ToOneRelationship,
    #[serde(default)]
    pub domain: ToOneRelationship,
}

/// Parameters for creating a route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub relationships: RouteRelationships,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl RouteCreate {
    /// Route on `domain_guid` owned by `space_guid`.
    pub fn new(space_guid: impl Into<String>, domain_guid: impl Into<String>) -> Self {
        Self {
            host: None,
            path: None,
            port: None,
            relationships: RouteRelationships {
                space: ToOneRelationship::to(space_guid),
                domain: ToOneRelationship::to(domain_guid),
            },
            metadata: None,
        }
    }

    /// Set the host name.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Parameters for updating a route (metadata only).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Resource for Route {
    const KIND: &'static str = "route";
    const PATH: &'static str = "routes";

    fn guid(&self) -> &str {
        &self.guid
    }
}

impl Create for Route {
    type Params = RouteCreate;
}

impl Update for Route {
    type Params = RouteUpdate;
}

impl Delete for Route {}
