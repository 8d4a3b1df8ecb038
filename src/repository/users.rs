//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{map_constraint_error, RowLock, UserStore};
use crate::{
    error::AppResult,
    models::{NewUser, User},
};

const COLUMNS: &str = "id, full_name, title, age";

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn select_by_id(lock: RowLock) -> String {
        format!("SELECT {} FROM person WHERE id = $1{}", COLUMNS, lock.clause())
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO person (full_name, title, age)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, title, age
            "#,
        )
        .bind(user.full_name())
        .bind(user.title())
        .bind(user.age())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, user: &NewUser) -> AppResult<Option<User>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, User>(&Self::select_by_id(RowLock::ForUpdate))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if current.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE person SET full_name = $1, title = $2, age = $3
            WHERE id = $4
            RETURNING id, full_name, title, age
            "#,
        )
        .bind(user.full_name())
        .bind(user.title())
        .bind(user.age())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&Self::select_by_id(RowLock::None))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(&format!("SELECT {} FROM person ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM person WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, || format!("User {} still owns books", id)))?;
        Ok(result.rows_affected() > 0)
    }
}
