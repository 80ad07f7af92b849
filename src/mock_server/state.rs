//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Cloud Foundry API server.
//! Resources are kept as raw JSON so one set of handlers serves every
//! collection.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

/// Collection that holds asynchronous jobs.
pub const JOBS: &str = "jobs";

/// Collections served even before anything is stored in them.
pub const COLLECTIONS: &[&str] = &[
    "apps",
    "spaces",
    "organizations",
    "routes",
    "roles",
    "service_credential_bindings",
    JOBS,
];

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access from handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Resources by collection path (e.g. `apps`), in insertion order.
    pub collections: HashMap<String, Vec<Value>>,

    /// Optional authentication token. If set, requests must carry it as a
    /// bearer token.
    pub required_token: Option<String>,

    /// Answer creates in these collections with 202 and a job instead of
    /// the resource.
    pub deferred_creates: Vec<String>,

    /// Scheme, host and port the server is reachable at. Set when the server
    /// binds; used to build pagination links and job locations.
    pub(crate) base_url: String,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a resource to a collection.
    pub fn with_resource(mut self, collection: &str, resource: Value) -> Self {
        self.insert(collection, resource);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Make creates in `collection` run as jobs.
    pub fn with_deferred_creates(mut self, collection: &str) -> Self {
        self.deferred_creates.push(collection.to_string());
        self
    }

    /// Store a resource, replacing any existing one with the same guid.
    pub fn insert(&mut self, collection: &str, resource: Value) {
        let items = self.collections.entry(collection.to_string()).or_default();
        let guid = guid_of(&resource).map(str::to_string);
        match items.iter_mut().find(|r| guid.is_some() && guid_of(r) == guid.as_deref()) {
            Some(existing) => *existing = resource,
            None => items.push(resource),
        }
    }

    /// Returns true if the collection is served.
    pub fn has_collection(&self, collection: &str) -> bool {
        COLLECTIONS.contains(&collection) || self.collections.contains_key(collection)
    }

    /// Get a resource by guid.
    pub fn get(&self, collection: &str, guid: &str) -> Option<&Value> {
        self.collections
            .get(collection)?
            .iter()
            .find(|r| guid_of(r) == Some(guid))
    }

    /// All resources of a collection that match every filter.
    ///
    /// Filters are `name -> accepted values`. `names` and `guids` match the
    /// resource's own fields; `{relation}_guids` matches
    /// `relationships.{relation}.data.guid`. Unknown filters are ignored.
    pub fn list(&self, collection: &str, filters: &BTreeMap<String, Vec<String>>) -> Vec<&Value> {
        let Some(items) = self.collections.get(collection) else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|r| {
                filters
                    .iter()
                    .all(|(name, accepted)| matches_filter(r, name, accepted))
            })
            .collect()
    }

    /// Create a resource from a request body and return the stored copy.
    pub fn create(&mut self, collection: &str, body: Value) -> Value {
        let guid = self.next_guid();
        let now = timestamp();

        let mut resource = defaults(collection);
        merge(&mut resource, body);
        if let Value::Object(fields) = &mut resource {
            fields.insert("guid".to_string(), json!(guid));
            fields.insert("created_at".to_string(), json!(now));
            fields.insert("updated_at".to_string(), json!(now));
        }

        self.insert(collection, resource.clone());
        resource
    }

    /// Apply a partial update. `null` metadata values remove the key.
    pub fn update(&mut self, collection: &str, guid: &str, patch: Value) -> Option<Value> {
        let resource = self
            .collections
            .get_mut(collection)?
            .iter_mut()
            .find(|r| guid_of(r) == Some(guid))?;

        merge(resource, patch);
        if let Some(fields) = resource.as_object_mut() {
            fields.insert("updated_at".to_string(), json!(timestamp()));
        }
        Some(resource.clone())
    }

    /// Remove a resource, returning it if it existed.
    pub fn remove(&mut self, collection: &str, guid: &str) -> Option<Value> {
        let items = self.collections.get_mut(collection)?;
        let index = items.iter().position(|r| guid_of(r) == Some(guid))?;
        Some(items.remove(index))
    }

    /// Record a finished job for `operation` and return its guid.
    pub fn complete_job(&mut self, operation: &str) -> String {
        let guid = self.next_guid();
        let now = timestamp();
        self.insert(
            JOBS,
            json!({
                "guid": guid,
                "operation": operation,
                "state": "COMPLETE",
                "errors": [],
                "warnings": [],
                "created_at": now,
                "updated_at": now,
            }),
        );
        guid
    }

    /// Absolute URL of a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn next_guid(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.next_id)
    }
}

fn guid_of(resource: &Value) -> Option<&str> {
    resource.get("guid").and_then(Value::as_str)
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn matches_filter(resource: &Value, name: &str, accepted: &[String]) -> bool {
    let field = match name {
        "names" => resource.get("name"),
        "guids" => resource.get("guid"),
        other => match other.strip_suffix("_guids") {
            Some(relation) => resource.pointer(&format!("/relationships/{relation}/data/guid")),
            None => return true,
        },
    };

    field
        .and_then(Value::as_str)
        .map(|value| accepted.iter().any(|a| a == value))
        .unwrap_or(false)
}

/// Fields a collection's resources always carry.
fn defaults(collection: &str) -> Value {
    let mut resource = json!({
        "metadata": { "labels": {}, "annotations": {} },
        "links": {},
    });
    let extra = match collection {
        "apps" => json!({ "state": "STOPPED" }),
        "organizations" => json!({ "suspended": false }),
        "routes" => json!({ "host": "", "path": "", "protocol": "http", "destinations": [] }),
        _ => return resource,
    };
    merge(&mut resource, extra);
    resource
}

/// Deep-merge `patch` into `target`. Objects merge key by key; a `null`
/// inside `metadata` deletes the key; anything else replaces.
fn merge(target: &mut Value, patch: Value) {
    merge_at(target, patch, false);
}

fn merge_at(target: &mut Value, patch: Value, in_metadata: bool) {
    match patch {
        Value::Object(patch) if target.is_object() => {
            if let Some(target) = target.as_object_mut() {
                merge_objects(target, patch, in_metadata);
            }
        }
        patch => *target = patch,
    }
}

fn merge_objects(target: &mut Map<String, Value>, patch: Map<String, Value>, in_metadata: bool) {
    for (key, value) in patch {
        if value.is_null() && in_metadata {
            target.remove(&key);
            continue;
        }
        let nested_metadata = in_metadata || key == "metadata";
        match target.get_mut(&key) {
            Some(existing) => merge_at(existing, value, nested_metadata),
            None => {
                target.insert(key, value);
            }
        }
    }
}
