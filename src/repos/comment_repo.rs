/*
 * Responsibility
 * - comments テーブル向け SQLx 操作
 * - postId の FK (CASCADE) 前提: post 削除でぶら下がる comment も消える
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: Uuid,

    pub content: String,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "authorName")]
    pub author_name: String,

    #[sqlx(rename = "postId")]
    pub post_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<CommentRow>, RepoError>;

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<CommentRow>, RepoError>;

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<CommentRow>, RepoError>;

    async fn insert(
        &self,
        content: &str,
        author_id: Uuid,
        post_id: Uuid,
    ) -> Result<CommentRow, RepoError>;

    async fn delete(&self, comment_id: Uuid) -> Result<bool, RepoError>;
}

pub struct PgCommentRepo {
    db: PgPool,
}

impl PgCommentRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<CommentRow>, RepoError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c."commentId", c.content, c."authorId",
                u."userName" AS "authorName",
                c."postId", c."createdAt"
            FROM comments c
            JOIN users u ON u."userId" = c."authorId"
            WHERE c."commentId" = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<CommentRow>, RepoError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c."commentId", c.content, c."authorId",
                u."userName" AS "authorName",
                c."postId", c."createdAt"
            FROM comments c
            JOIN users u ON u."userId" = c."authorId"
            WHERE c."postId" = $1
            ORDER BY c."createdAt" ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<CommentRow>, RepoError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c."commentId", c.content, c."authorId",
                u."userName" AS "authorName",
                c."postId", c."createdAt"
            FROM comments c
            JOIN users u ON u."userId" = c."authorId"
            WHERE c."authorId" = $1
            ORDER BY c."createdAt" DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn insert(
        &self,
        content: &str,
        author_id: Uuid,
        post_id: Uuid,
    ) -> Result<CommentRow, RepoError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (content, "authorId", "postId")
            VALUES ($1, $2, $3)
            RETURNING
                "commentId", content, "authorId",
                (SELECT u."userName" FROM users u WHERE u."userId" = "authorId") AS "authorName",
                "postId", "createdAt"
            "#,
        )
        .bind(content)
        .bind(author_id)
        .bind(post_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, comment_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE "commentId" = $1
            "#,
        )
        .bind(comment_id)
        .execute(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
