/*
 * Responsibility
 * - service テスト用の in-memory repo 実装
 * - trait 契約 (find → None / exists → false など) を DB なしで再現する
 */
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::comment_repo::{CommentRepo, CommentRow};
use crate::repos::error::RepoError;
use crate::repos::post_repo::{PostRepo, PostRow};
use crate::repos::user_repo::{UserRepo, UserRow};

const FAKE_AUTHOR_NAME: &str = "tester";

#[derive(Default)]
pub struct InMemoryUserRepo {
    rows: Mutex<HashMap<Uuid, UserRow>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn insert(
        &self,
        user_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        // unique email 制約の再現
        if rows.values().any(|r| r.email == email) {
            return Err(RepoError::Conflict);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            user_name: user_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepo {
    rows: Mutex<HashMap<Uuid, PostRow>>,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepo for InMemoryPostRepo {
    async fn list(&self, limit: i64, _offset: i64) -> Result<Vec<PostRow>, RepoError> {
        let rows = self.rows.lock().unwrap();
        let mut all: Vec<PostRow> = rows.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostRow>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostRow>, RepoError> {
        Ok(self.rows.lock().unwrap().get(&post_id).cloned())
    }

    async fn exists(&self, post_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.rows.lock().unwrap().contains_key(&post_id))
    }

    async fn insert(
        &self,
        title: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<PostRow, RepoError> {
        let now = Utc::now();
        let row = PostRow {
            post_id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            author_name: FAKE_AUTHOR_NAME.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(row.post_id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<PostRow>, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&post_id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            row.title = title.to_string();
        }
        if let Some(content) = content {
            row.content = content.to_string();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, post_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.rows.lock().unwrap().remove(&post_id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepo {
    rows: Mutex<HashMap<Uuid, CommentRow>>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepo for InMemoryCommentRepo {
    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<CommentRow>, RepoError> {
        Ok(self.rows.lock().unwrap().get(&comment_id).cloned())
    }

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<CommentRow>, RepoError> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<CommentRow> = rows
            .values()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<CommentRow>, RepoError> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<CommentRow> = rows
            .values()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn insert(
        &self,
        content: &str,
        author_id: Uuid,
        post_id: Uuid,
    ) -> Result<CommentRow, RepoError> {
        let row = CommentRow {
            comment_id: Uuid::new_v4(),
            content: content.to_string(),
            author_id,
            author_name: FAKE_AUTHOR_NAME.to_string(),
            post_id,
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .unwrap()
            .insert(row.comment_id, row.clone());
        Ok(row)
    }

    async fn delete(&self, comment_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.rows.lock().unwrap().remove(&comment_id).is_some())
    }
}
