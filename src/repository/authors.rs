//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EntityStore;
use crate::{
    error::{AppError, AppResult},
    models::Author,
    patch::EntityKind,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Author> for AuthorsRepository {
    async fn find_all(&self) -> AppResult<Vec<Author>> {
        super::fetch_all(&self.pool, EntityKind::Author).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        super::fetch_by_id(&self.pool, EntityKind::Author, id).await
    }

    async fn insert(&self, author: &Author) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, surname, birthdate, active, nationality)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(author.birthdate)
        .bind(author.active)
        .bind(&author.nationality)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, author: &Author) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = $1, surname = $2, birthdate = $3, active = $4, nationality = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(author.birthdate)
        .bind(author.active)
        .bind(&author.nationality)
        .bind(author.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::entity_not_found(EntityKind::Author, author.id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        super::exists(&self.pool, EntityKind::Author, id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        super::delete(&self.pool, EntityKind::Author, id).await
    }
}
