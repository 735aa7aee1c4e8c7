//! Book categories repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EntityStore;
use crate::{
    error::{AppError, AppResult},
    models::BookCategory,
    patch::EntityKind,
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<BookCategory> for CategoriesRepository {
    async fn find_all(&self) -> AppResult<Vec<BookCategory>> {
        super::fetch_all(&self.pool, EntityKind::BookCategory).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<BookCategory>> {
        super::fetch_by_id(&self.pool, EntityKind::BookCategory, id).await
    }

    async fn insert(&self, category: &BookCategory) -> AppResult<BookCategory> {
        let row = sqlx::query_as::<_, BookCategory>(
            r#"
            INSERT INTO book_categories (name, description, active, created_date, number_books)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.active)
        .bind(category.created_date)
        .bind(category.number_books)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, category: &BookCategory) -> AppResult<BookCategory> {
        sqlx::query_as::<_, BookCategory>(
            r#"
            UPDATE book_categories
            SET name = $1, description = $2, active = $3, created_date = $4, number_books = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.active)
        .bind(category.created_date)
        .bind(category.number_books)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::entity_not_found(EntityKind::BookCategory, category.id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        super::exists(&self.pool, EntityKind::BookCategory, id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        super::delete(&self.pool, EntityKind::BookCategory, id).await
    }
}
