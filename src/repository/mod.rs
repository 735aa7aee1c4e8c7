//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod categories;
pub mod loans;
pub mod users;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::User,
    patch::{EntityKind, RelatedRef, RelationLookup},
};

/// Persistence operations shared by every record kind
#[async_trait]
pub trait EntityStore<E: Send + Sync>: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<E>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>>;

    /// Insert a new record, ignoring its id, and return it as stored
    async fn insert(&self, entity: &E) -> AppResult<E>;

    /// Overwrite an existing record identified by its id
    async fn save(&self, entity: &E) -> AppResult<E>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Account lookups used by authentication
#[async_trait]
pub trait UserAccounts: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Table backing each record kind
pub fn table_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Book => "books",
        EntityKind::Author => "authors",
        EntityKind::BookCategory => "book_categories",
        EntityKind::Loan => "loans",
        EntityKind::User => "users",
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
    pub loans: loans::LoansRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl RelationLookup for Repository {
    async fn find_reference(&self, kind: EntityKind, id: i64) -> AppResult<Option<RelatedRef>> {
        let query = format!("SELECT id FROM {} WHERE id = $1", table_for(kind));
        let found: Option<i64> = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.map(|id| RelatedRef { kind, id }))
    }
}

// Statements that only differ by table name

async fn fetch_all<E>(pool: &Pool<Postgres>, kind: EntityKind) -> AppResult<Vec<E>>
where
    E: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!("SELECT * FROM {} ORDER BY id", table_for(kind));
    let rows = sqlx::query_as::<_, E>(&query).fetch_all(pool).await?;
    Ok(rows)
}

async fn fetch_by_id<E>(pool: &Pool<Postgres>, kind: EntityKind, id: i64) -> AppResult<Option<E>>
where
    E: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!("SELECT * FROM {} WHERE id = $1", table_for(kind));
    let row = sqlx::query_as::<_, E>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn exists(pool: &Pool<Postgres>, kind: EntityKind, id: i64) -> AppResult<bool> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table_for(kind));
    let exists: bool = sqlx::query_scalar(&query).bind(id).fetch_one(pool).await?;
    Ok(exists)
}

async fn delete(pool: &Pool<Postgres>, kind: EntityKind, id: i64) -> AppResult<()> {
    let query = format!("DELETE FROM {} WHERE id = $1", table_for(kind));
    sqlx::query(&query).bind(id).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_match_migration() {
        let migration = include_str!("../../migrations/20240101000000_init.sql");
        for kind in [
            EntityKind::Book,
            EntityKind::Author,
            EntityKind::BookCategory,
            EntityKind::Loan,
            EntityKind::User,
        ] {
            let create = format!("CREATE TABLE IF NOT EXISTS {} (", table_for(kind));
            assert!(migration.contains(&create), "no table for {}", kind);
        }
    }
}
