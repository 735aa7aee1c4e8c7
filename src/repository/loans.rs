//! Loans repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EntityStore;
use crate::{
    error::{AppError, AppResult},
    models::Loan,
    patch::EntityKind,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Loan> for LoansRepository {
    async fn find_all(&self) -> AppResult<Vec<Loan>> {
        super::fetch_all(&self.pool, EntityKind::Loan).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Loan>> {
        super::fetch_by_id(&self.pool, EntityKind::Loan, id).await
    }

    async fn insert(&self, loan: &Loan) -> AppResult<Loan> {
        let row = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (name, customer_name, email, loan_date, quantity, book_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&loan.name)
        .bind(&loan.customer_name)
        .bind(&loan.email)
        .bind(loan.loan_date)
        .bind(loan.quantity)
        .bind(loan.book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, loan: &Loan) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET name = $1, customer_name = $2, email = $3, loan_date = $4, quantity = $5,
                book_id = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&loan.name)
        .bind(&loan.customer_name)
        .bind(&loan.email)
        .bind(loan.loan_date)
        .bind(loan.quantity)
        .bind(loan.book_id)
        .bind(loan.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::entity_not_found(EntityKind::Loan, loan.id))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        super::exists(&self.pool, EntityKind::Loan, id).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        super::delete(&self.pool, EntityKind::Loan, id).await
    }
}
