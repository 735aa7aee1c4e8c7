//! PATCH and PUT application against an entity store

use super::{
    coerce::coerce, describe, FieldDescriptor, FieldRole, FieldValue, PatchError, Patchable,
    RelationLookup, RelationResolver, UpdateRequest,
};
use crate::{
    error::{AppError, AppResult},
    repository::EntityStore,
};

type Change = (&'static FieldDescriptor, FieldValue);

pub struct UpdateEngine<'a, E: Patchable> {
    store: &'a dyn EntityStore<E>,
    relations: RelationResolver<'a>,
}

impl<'a, E: Patchable> UpdateEngine<'a, E> {
    pub fn new(store: &'a dyn EntityStore<E>, lookup: &'a dyn RelationLookup) -> Self {
        Self {
            store,
            relations: RelationResolver::new(lookup),
        }
    }

    /// Apply a partial update.
    ///
    /// Unknown keys, the identity and system fields are skipped. Every other
    /// key is resolved before the record is touched, so a single bad value
    /// fails the whole request and nothing is saved.
    pub async fn apply_partial(&self, id: i64, request: &UpdateRequest) -> AppResult<E> {
        let mut entity = self.load(id).await?;

        let mut changes: Vec<Change> = Vec::with_capacity(request.len());
        for (key, raw) in request.iter() {
            let Some(field) = describe(E::KIND, key) else {
                tracing::debug!("Ignoring unknown field '{}' for {} {}", key, E::KIND, id);
                continue;
            };

            match field.role {
                FieldRole::Identity | FieldRole::System => {
                    tracing::debug!("Ignoring read-only field '{}' for {} {}", key, E::KIND, id);
                }
                FieldRole::RelationKey | FieldRole::RelationObject | FieldRole::ReverseCollection => {
                    let outcome = self.relations.resolve_relation(E::KIND, key, raw).await?;
                    changes.push((field, outcome.into_value(field)?));
                }
                FieldRole::Attribute => changes.push((field, coerce(raw, field)?)),
            }
        }

        self.commit(&mut entity, changes)?;
        let saved = self.store.save(&entity).await?;
        tracing::info!("Patched {} {} ({} field(s) submitted)", E::KIND, id, request.len());
        Ok(saved)
    }

    /// Replace every mutable field with the value carried by `replacement`.
    ///
    /// The replacement's id and system fields are ignored. Relation keys are
    /// checked against their store like in a partial update.
    pub async fn replace(&self, id: i64, replacement: &E) -> AppResult<E> {
        let mut entity = self.load(id).await?;

        let mut changes: Vec<Change> = Vec::new();
        for field in E::FIELDS.iter().filter(|field| field.mutable) {
            let Some(value) = replacement.field(field.name) else {
                continue;
            };
            let value = match field.role {
                FieldRole::RelationKey => {
                    let id = value.into_optional_reference(field.name)?;
                    self.relations.resolve_id(field, id).await?.into_value(field)?
                }
                _ => value,
            };
            changes.push((field, value));
        }

        self.commit(&mut entity, changes)?;
        let saved = self.store.save(&entity).await?;
        tracing::info!("Replaced {} {}", E::KIND, id);
        Ok(saved)
    }

    /// Check every relation key of a record that is about to be created
    pub async fn verify_references(&self, entity: &E) -> AppResult<()> {
        for field in E::FIELDS.iter().filter(|f| f.role == FieldRole::RelationKey) {
            if let Some(value) = entity.field(field.name) {
                let id = value.into_optional_reference(field.name)?;
                self.relations.resolve_id(field, id).await?.into_value(field)?;
            }
        }
        Ok(())
    }

    async fn load(&self, id: i64) -> AppResult<E> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found(E::KIND, id))
    }

    fn commit(&self, entity: &mut E, changes: Vec<Change>) -> Result<(), PatchError> {
        for (field, value) in changes {
            entity.set_field(field.name, value)?;
        }
        Ok(())
    }
}
