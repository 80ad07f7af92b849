//! Building blocks shared by V3 resource representations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// User-provided labels and annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Labels, selectable with `label_selector`.
    #[serde(default)]
    pub labels: BTreeMap<String, Option<String>>,
    /// Free-form annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, Option<String>>,
}

impl Metadata {
    /// Value of a label, if set.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).and_then(|v| v.as_deref())
    }

    /// Set a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), Some(value.into()));
        self
    }
}

/// Guid reference inside a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipData {
    pub guid: String,
}

/// A to-one relationship (`{"data": {"guid": "..."}}`).
///
/// `data` is `null` when the relationship is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToOneRelationship {
    pub data: Option<RelationshipData>,
}

impl ToOneRelationship {
    /// Relationship pointing at `guid`.
    pub fn to(guid: impl Into<String>) -> Self {
        Self {
            data: Some(RelationshipData { guid: guid.into() }),
        }
    }

    /// Guid of the related resource, if set.
    pub fn guid(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.guid.as_str())
    }
}
