/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (credential store)
 * - passwordHash はここで保存するだけ。hash/verify は services::auth::password の責務
 * - DB エラーは RepoError に変換して返す (unique email 違反 → Conflict)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "userName")]
    pub user_name: String,
    pub email: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(
        &self,
        user_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError>;
}

pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(
        &self,
        user_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users ("userName", email, "passwordHash")
            VALUES ($1, $2, $3)
            RETURNING "userId", "userName", email, "passwordHash"
            "#,
        )
        .bind(user_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "userName", email, "passwordHash"
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "userName", email, "passwordHash"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}
