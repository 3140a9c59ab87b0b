/*
 * Responsibility
 * - posts の「load → 所有チェック → mutate」のオーケストレーション
 * - author_id は必ず検証済みの caller から採番する (payload は信用しない)
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::repos::post_repo::{PostRepo, PostRow};
use crate::services::authz::ensure_owner;
use crate::services::error::ServiceError;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepo>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepo>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        caller_id: Uuid,
    ) -> Result<PostRow, ServiceError> {
        let row = self.repo.insert(title, content, caller_id).await?;
        Ok(row)
    }

    pub async fn get(&self, post_id: Uuid) -> Result<PostRow, ServiceError> {
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::NotFound("post"))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostRow>, ServiceError> {
        let rows = self.repo.list(limit, offset).await?;
        Ok(rows)
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostRow>, ServiceError> {
        let rows = self.repo.list_by_author(author_id).await?;
        Ok(rows)
    }

    /// 所有チェックは保存済みの行の author に対して行う。
    /// payload に author を持たせない設計なので、caller が自分の id を詰めた
    /// payload で他人の post を更新する余地はない。
    pub async fn update(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
        caller_id: Uuid,
    ) -> Result<PostRow, ServiceError> {
        let existing = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::NotFound("post"))?;

        ensure_owner("post", existing.author_id, caller_id)?;

        // チェックと書き込みの間で行が消えるレース (並行 delete) は
        // not found として扱う
        self.repo
            .update(post_id, title, content)
            .await?
            .ok_or(ServiceError::NotFound("post"))
    }

    pub async fn delete(&self, post_id: Uuid, caller_id: Uuid) -> Result<(), ServiceError> {
        let existing = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::NotFound("post"))?;

        ensure_owner("post", existing.author_id, caller_id)?;

        if !self.repo.delete(post_id).await? {
            return Err(ServiceError::NotFound("post"));
        }
        Ok(())
    }
}
