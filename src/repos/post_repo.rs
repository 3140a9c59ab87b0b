/*
 * Responsibility
 * - posts テーブル向け SQLx 操作
 * - authorName は users JOIN で取得 (レスポンスに表示名が必要なため)
 * - 所有チェックは service 側。ここは素朴な CRUD のみ
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    #[sqlx(rename = "postId")]
    pub post_id: Uuid,

    pub title: String,
    pub content: String,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "authorName")]
    pub author_name: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostRow>, RepoError>;

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostRow>, RepoError>;

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostRow>, RepoError>;

    async fn exists(&self, post_id: Uuid) -> Result<bool, RepoError>;

    async fn insert(
        &self,
        title: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<PostRow, RepoError>;

    /// None で渡したフィールドは更新しない。行が無ければ Ok(None)。
    async fn update(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<PostRow>, RepoError>;

    async fn delete(&self, post_id: Uuid) -> Result<bool, RepoError>;
}

pub struct PgPostRepo {
    db: PgPool,
}

impl PgPostRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostRow>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p."postId", p.title, p.content, p."authorId",
                u."userName" AS "authorName",
                p."createdAt", p."updatedAt"
            FROM posts p
            JOIN users u ON u."userId" = p."authorId"
            ORDER BY p."createdAt" DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostRow>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p."postId", p.title, p.content, p."authorId",
                u."userName" AS "authorName",
                p."createdAt", p."updatedAt"
            FROM posts p
            JOIN users u ON u."userId" = p."authorId"
            WHERE p."authorId" = $1
            ORDER BY p."createdAt" DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostRow>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p."postId", p.title, p.content, p."authorId",
                u."userName" AS "authorName",
                p."createdAt", p."updatedAt"
            FROM posts p
            JOIN users u ON u."userId" = p."authorId"
            WHERE p."postId" = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn exists(&self, post_id: Uuid) -> Result<bool, RepoError> {
        let found: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT "postId"
            FROM posts
            WHERE "postId" = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(found.is_some())
    }

    async fn insert(
        &self,
        title: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<PostRow, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, "authorId")
            VALUES ($1, $2, $3)
            RETURNING
                "postId", title, content, "authorId",
                (SELECT u."userName" FROM users u WHERE u."userId" = "authorId") AS "authorName",
                "createdAt", "updatedAt"
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<PostRow>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                "updatedAt" = now()
            WHERE "postId" = $1
            RETURNING
                "postId", title, content, "authorId",
                (SELECT u."userName" FROM users u WHERE u."userId" = "authorId") AS "authorName",
                "createdAt", "updatedAt"
            "#,
        )
        .bind(post_id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, post_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE "postId" = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
