//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{EntityStore, UserAccounts};
use crate::{
    error::{AppError, AppResult},
    models::User,
    patch::EntityKind,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<User> for UsersRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        super::fetch_all(&self.pool, EntityKind::User).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        super::fetch_by_id(&self.pool, EntityKind::User, id).await
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, username, email, password, creation_date, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.creation_date)
        .bind(user.active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Username and creation date are written once, on insert
    async fn save(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, password = $3, active = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.active)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::entity_not_found(EntityKind::User, user.id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        super::exists(&self.pool, EntityKind::User, id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        super::delete(&self.pool, EntityKind::User, id).await
    }
}

#[async_trait]
impl UserAccounts for UsersRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
