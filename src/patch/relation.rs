//! Relation updates by id key

use async_trait::async_trait;
use serde_json::Value;

use super::{coerce::coerce, describe, EntityKind, FieldDescriptor, FieldRole, FieldType, FieldValue, PatchError};
use crate::error::AppResult;

/// Handle on a related record that is known to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedRef {
    pub kind: EntityKind,
    pub id: i64,
}

/// Lookup of related records, one store per relation kind
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationLookup: Send + Sync {
    async fn find_reference(&self, kind: EntityKind, id: i64) -> AppResult<Option<RelatedRef>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelationOutcome {
    Resolved(RelatedRef),
    /// `null` sent to a nullable id key
    Cleared,
    /// Nested objects, reverse collections, or anything that is not an id key
    Unsupported,
    NotFound { kind: EntityKind, id: i64 },
}

impl RelationOutcome {
    /// Collapse into the value stored on the record, or the error to report
    pub fn into_value(self, field: &FieldDescriptor) -> Result<FieldValue, PatchError> {
        match self {
            RelationOutcome::Resolved(related) => Ok(FieldValue::Reference(related.id)),
            RelationOutcome::Cleared => Ok(FieldValue::Null),
            RelationOutcome::Unsupported => Err(PatchError::UnsupportedRelationUpdate {
                field: field.name.to_string(),
            }),
            RelationOutcome::NotFound { kind, id } => Err(PatchError::RelatedEntityNotFound {
                field: field.name.to_string(),
                kind,
                id,
            }),
        }
    }
}

pub struct RelationResolver<'a> {
    lookup: &'a dyn RelationLookup,
}

impl<'a> RelationResolver<'a> {
    pub fn new(lookup: &'a dyn RelationLookup) -> Self {
        Self { lookup }
    }

    /// Resolve `raw` sent to `field_name` of a `kind` record
    pub async fn resolve_relation(
        &self,
        kind: EntityKind,
        field_name: &str,
        raw: &Value,
    ) -> AppResult<RelationOutcome> {
        match describe(kind, field_name) {
            Some(field) => self.resolve(field, raw).await,
            None => Ok(RelationOutcome::Unsupported),
        }
    }

    /// Resolve a raw JSON id sent to a relation field.
    ///
    /// Ids given as text are parsed like any long integer; a malformed id is
    /// reported as an invalid value of the id key.
    async fn resolve(&self, field: &FieldDescriptor, raw: &Value) -> AppResult<RelationOutcome> {
        if field.role != FieldRole::RelationKey || raw.is_object() || raw.is_array() {
            return Ok(RelationOutcome::Unsupported);
        }

        let id_field = FieldDescriptor {
            field_type: FieldType::LongInteger,
            ..*field
        };
        match coerce(raw, &id_field)? {
            FieldValue::LongInteger(id) => self.resolve_id(field, Some(id)).await,
            _ => self.resolve_id(field, None).await,
        }
    }

    /// Resolve an already typed id, as carried by a full replacement
    pub async fn resolve_id(&self, field: &FieldDescriptor, id: Option<i64>) -> AppResult<RelationOutcome> {
        let target = match (field.role, field.field_type) {
            (FieldRole::RelationKey, FieldType::Relation(target)) => target,
            _ => return Ok(RelationOutcome::Unsupported),
        };

        let Some(id) = id else {
            return if field.nullable {
                Ok(RelationOutcome::Cleared)
            } else {
                Err(PatchError::invalid(field.name, &Value::Null).into())
            };
        };

        Ok(match self.lookup.find_reference(target, id).await? {
            Some(related) => RelationOutcome::Resolved(related),
            None => RelationOutcome::NotFound { kind: target, id },
        })
    }
}
