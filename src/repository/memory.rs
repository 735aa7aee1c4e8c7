//! In-memory stores backing the unit and router tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{EntityStore, UserAccounts};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookCategory, Loan, User},
    patch::{EntityKind, FieldValue, Patchable, RelatedRef, RelationLookup},
};

pub(crate) struct MemoryStore<E> {
    rows: Mutex<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    saves: AtomicUsize,
}

impl<E: Patchable> MemoryStore<E> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        let next_id = rows.iter().map(Patchable::id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows.into_iter().map(|row| (row.id(), row)).collect()),
            next_id: AtomicI64::new(next_id),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<E: Patchable> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Patchable> EntityStore<E> for MemoryStore<E> {
    async fn find_all(&self) -> AppResult<Vec<E>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>> {
        Ok(self.get(id))
    }

    async fn insert(&self, entity: &E) -> AppResult<E> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut row = entity.clone();
        row.set_field("id", FieldValue::LongInteger(id))?;
        self.rows.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&entity.id()) {
            Some(row) => *row = entity.clone(),
            None => return Err(AppError::entity_not_found(E::KIND, entity.id())),
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(entity.clone())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserAccounts for MemoryStore<User> {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|user| user.username.eq_ignore_ascii_case(username))
            .cloned())
    }
}

/// One store per record kind, doubling as the relation lookup
#[derive(Clone, Default)]
pub(crate) struct MemoryStores {
    pub books: Arc<MemoryStore<Book>>,
    pub authors: Arc<MemoryStore<Author>>,
    pub categories: Arc<MemoryStore<BookCategory>>,
    pub loans: Arc<MemoryStore<Loan>>,
    pub users: Arc<MemoryStore<User>>,
}

#[async_trait]
impl RelationLookup for MemoryStores {
    async fn find_reference(&self, kind: EntityKind, id: i64) -> AppResult<Option<RelatedRef>> {
        let found = match kind {
            EntityKind::Book => self.books.get(id).is_some(),
            EntityKind::Author => self.authors.get(id).is_some(),
            EntityKind::BookCategory => self.categories.get(id).is_some(),
            EntityKind::Loan => self.loans.get(id).is_some(),
            EntityKind::User => self.users.get(id).is_some(),
        };
        Ok(found.then_some(RelatedRef { kind, id }))
    }
}
