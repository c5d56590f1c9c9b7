//! Entity and key model
//!
//! A light serde mirror of the Datastore v1 REST entity. Property values are
//! kept as opaque JSON; the pagination engine never looks inside them.

use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// Identifies the project and namespace a query runs in
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionId {
    /// Project ID
    pub project_id: String,
    /// Namespace ID (default namespace when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<String>,
}

impl PartitionId {
    /// Create a partition for the default namespace of a project
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            namespace_id: None,
        }
    }

    /// Set the namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace_id = Some(namespace.into());
        self
    }
}

/// One element of a key path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathElement {
    /// Entity kind
    pub kind: String,
    /// Numeric ID (int64 travels as a decimal string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Entity key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    /// Partition the entity lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_id: Option<PartitionId>,
    /// Ancestor path, ending with the entity itself
    #[serde(default)]
    pub path: Vec<PathElement>,
}

impl Key {
    /// Create a key with a numeric ID
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            partition_id: None,
            path: vec![PathElement {
                kind: kind.into(),
                id: Some(id.to_string()),
                name: None,
            }],
        }
    }

    /// Create a key with a name
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            partition_id: None,
            path: vec![PathElement {
                kind: kind.into(),
                id: None,
                name: Some(name.into()),
            }],
        }
    }

    /// Kind of the last path element
    pub fn kind(&self) -> Option<&str> {
        self.path.last().map(|p| p.kind.as_str())
    }

    /// Numeric ID of the last path element
    pub fn id(&self) -> Option<i64> {
        self.path
            .last()
            .and_then(|p| p.id.as_deref())
            .and_then(|id| id.parse().ok())
    }

    /// Name of the last path element
    pub fn name(&self) -> Option<&str> {
        self.path.last().and_then(|p| p.name.as_deref())
    }
}

/// An entity returned by a query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    /// Properties in their wire encoding
    #[serde(default)]
    pub properties: JsonObject,
}

impl Entity {
    /// Create an entity with a key and no properties
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            properties: JsonObject::new(),
        }
    }

    /// Set a property in its wire encoding
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Get a property in its wire encoding
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }
}
