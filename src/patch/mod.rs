//! Field-level update resolution for PATCH and PUT requests
//!
//! Every record kind declares a static field registry ([`schema`]) together with
//! a typed getter/setter pair ([`Patchable`]). Raw JSON values are converted by
//! [`coerce`], relation id keys go through [`relation`], and [`engine`] ties
//! both to an [`EntityStore`](crate::repository::EntityStore).
//!
//! Updates are plain read-modify-write cycles without locking: two concurrent
//! updates of the same record race, and the last save wins.

pub mod coerce;
pub mod engine;
pub mod relation;
pub mod schema;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

pub use engine::UpdateEngine;
pub use relation::{RelatedRef, RelationLookup, RelationOutcome, RelationResolver};
pub use schema::{describe, EntityKind, FieldDescriptor, FieldRole, FieldType, FieldValue};

/// A record whose fields can be read and written by wire name
pub trait Patchable: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Field registry, exhaustive for every declared field
    const FIELDS: &'static [FieldDescriptor];

    fn id(&self) -> i64;

    /// Current value of a scalar or relation key field, `None` for names with
    /// no stored value (unknown names, relation objects, reverse collections)
    fn field(&self, name: &str) -> Option<FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError>;
}

/// Loosely typed PATCH body: wire field name to raw JSON value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UpdateRequest(#[schema(value_type = Object)] Map<String, Value>);

impl UpdateRequest {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Failures detected while resolving an update, before anything is persisted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidFieldValue { field: String, value: Value },

    #[error("Relation field '{field}' cannot be assigned directly")]
    UnsupportedRelationUpdate { field: String },

    #[error("{kind} not found with id: {id} (field '{field}')")]
    RelatedEntityNotFound {
        field: String,
        kind: EntityKind,
        id: i64,
    },

    #[error("Field '{field}' received a value of the wrong type")]
    SchemaMismatch { field: String },
}

impl PatchError {
    pub fn invalid(field: &str, value: &Value) -> Self {
        PatchError::InvalidFieldValue {
            field: field.to_string(),
            value: value.clone(),
        }
    }

    pub(crate) fn mismatch(field: &str) -> Self {
        PatchError::SchemaMismatch {
            field: field.to_string(),
        }
    }
}
