//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EntityStore;
use crate::{
    error::{AppError, AppResult},
    models::Book,
    patch::EntityKind,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Book> for BooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        super::fetch_all(&self.pool, EntityKind::Book).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        super::fetch_by_id(&self.pool, EntityKind::Book, id).await
    }

    async fn insert(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, genre, pages, price, available, category_id, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.genre)
        .bind(book.pages)
        .bind(book.price)
        .bind(book.available)
        .bind(book.category_id)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, genre = $2, pages = $3, price = $4, available = $5,
                category_id = $6, author_id = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.genre)
        .bind(book.pages)
        .bind(book.price)
        .bind(book.available)
        .bind(book.category_id)
        .bind(book.author_id)
        .bind(book.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::entity_not_found(EntityKind::Book, book.id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        super::exists(&self.pool, EntityKind::Book, id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        super::delete(&self.pool, EntityKind::Book, id).await
    }
}
