/*
 * Responsibility
 * - comments の作成・削除のオーケストレーション
 * - 作成は「対象 post の存在チェック」。所有チェックではない
 *   (どの認証済みユーザーでも他人の post にコメントできる)
 * - 削除は post と同じ所有チェック
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::repos::comment_repo::{CommentRepo, CommentRow};
use crate::repos::post_repo::PostRepo;
use crate::services::authz::ensure_owner;
use crate::services::error::ServiceError;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepo>,
    posts: Arc<dyn PostRepo>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { comments, posts }
    }

    /// 存在しない post への insert は行わない (FK 違反をエラーハンドリングに
    /// 使わず、先にチェックして NotFound を返す)。
    pub async fn create(
        &self,
        post_id: Uuid,
        content: &str,
        caller_id: Uuid,
    ) -> Result<CommentRow, ServiceError> {
        if !self.posts.exists(post_id).await? {
            return Err(ServiceError::NotFound("post"));
        }

        let row = self.comments.insert(content, caller_id, post_id).await?;
        Ok(row)
    }

    pub async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<CommentRow>, ServiceError> {
        let rows = self.comments.list_by_post(post_id).await?;
        Ok(rows)
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<CommentRow>, ServiceError> {
        let rows = self.comments.list_by_author(author_id).await?;
        Ok(rows)
    }

    pub async fn delete(&self, comment_id: Uuid, caller_id: Uuid) -> Result<(), ServiceError> {
        let existing = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(ServiceError::NotFound("comment"))?;

        ensure_owner("comment", existing.author_id, caller_id)?;

        if !self.comments.delete(comment_id).await? {
            return Err(ServiceError::NotFound("comment"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::testing::{InMemoryCommentRepo, InMemoryPostRepo};

    struct Fixture {
        svc: CommentService,
        posts: Arc<InMemoryPostRepo>,
        comments: Arc<InMemoryCommentRepo>,
    }

    fn fixture() -> Fixture {
        let posts = Arc::new(InMemoryPostRepo::new());
        let comments = Arc::new(InMemoryCommentRepo::new());
        Fixture {
            svc: CommentService::new(comments.clone(), posts.clone()),
            posts,
            comments,
        }
    }

    #[tokio::test]
    async fn create_on_missing_post_is_not_found_and_inserts_nothing() {
        let f = fixture();

        let err = f
            .svc
            .create(Uuid::new_v4(), "hello", Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("post")));
        assert_eq!(f.comments.len(), 0);
    }

    #[tokio::test]
    async fn any_authenticated_user_may_comment() {
        let f = fixture();
        let post_owner = Uuid::new_v4();
        let commenter = Uuid::new_v4();
        let post = f.posts.insert("T", "C", post_owner).await.unwrap();

        let comment = f
            .svc
            .create(post.post_id, "nice post", commenter)
            .await
            .unwrap();
        assert_eq!(comment.author_id, commenter);
        assert_eq!(comment.post_id, post.post_id);
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_not_authorized() {
        let f = fixture();
        let commenter = Uuid::new_v4();
        let other = Uuid::new_v4();
        let post = f.posts.insert("T", "C", commenter).await.unwrap();
        let comment = f.svc.create(post.post_id, "mine", commenter).await.unwrap();

        let err = f
            .svc
            .delete(comment.comment_id, other)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotAuthorized("comment")));
        assert_eq!(f.comments.len(), 1);
    }

    #[tokio::test]
    async fn delete_by_owner_removes_the_comment() {
        let f = fixture();
        let commenter = Uuid::new_v4();
        let post = f.posts.insert("T", "C", commenter).await.unwrap();
        let comment = f.svc.create(post.post_id, "mine", commenter).await.unwrap();

        f.svc.delete(comment.comment_id, commenter).await.unwrap();
        assert_eq!(f.comments.len(), 0);
    }

    #[tokio::test]
    async fn list_by_author_returns_only_their_comments() {
        let f = fixture();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let post = f.posts.insert("T", "C", alice).await.unwrap();

        f.svc.create(post.post_id, "from alice", alice).await.unwrap();
        f.svc.create(post.post_id, "from bob", bob).await.unwrap();
        f.svc.create(post.post_id, "alice again", alice).await.unwrap();

        let found = f.svc.list_by_author(alice).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.author_id == alice));
    }

    #[tokio::test]
    async fn delete_missing_comment_is_not_found() {
        let f = fixture();
        let err = f
            .svc
            .delete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("comment")));
    }
}
