//! CRUD operations shared by every record kind

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    patch::{Patchable, RelationLookup, UpdateEngine, UpdateRequest},
    repository::EntityStore,
};

pub struct RecordService<E: Patchable> {
    store: Arc<dyn EntityStore<E>>,
    relations: Arc<dyn RelationLookup>,
}

impl<E: Patchable> Clone for RecordService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            relations: self.relations.clone(),
        }
    }
}

impl<E: Patchable> RecordService<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>, relations: Arc<dyn RelationLookup>) -> Self {
        Self { store, relations }
    }

    fn engine(&self) -> UpdateEngine<'_, E> {
        UpdateEngine::new(self.store.as_ref(), self.relations.as_ref())
    }

    pub async fn list(&self) -> AppResult<Vec<E>> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<E> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found(E::KIND, id))
    }

    /// Store a new record once its relation keys point at existing records
    pub async fn create(&self, entity: E) -> AppResult<E> {
        self.engine().verify_references(&entity).await?;
        let created = self.store.insert(&entity).await?;
        tracing::info!("Created {} {}", E::KIND, created.id());
        Ok(created)
    }

    pub async fn replace(&self, id: i64, replacement: &E) -> AppResult<E> {
        self.engine().replace(id, replacement).await
    }

    pub async fn patch(&self, id: i64, request: &UpdateRequest) -> AppResult<E> {
        self.engine().apply_partial(id, request).await
    }

    /// Fail with a not-found error unless a record with `id` exists
    pub async fn ensure_exists(&self, id: i64) -> AppResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::entity_not_found(E::KIND, id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.ensure_exists(id).await?;
        self.store.delete_by_id(id).await?;
        tracing::info!("Deleted {} {}", E::KIND, id);
        Ok(())
    }
}
