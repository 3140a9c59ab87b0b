/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::user_repo::UserRepo;
use crate::services::auth::token_service::TokenService;
use crate::services::comments::CommentService;
use crate::services::posts::PostService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub tokens: Arc<TokenService>,
    pub posts: PostService,
    pub comments: CommentService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepo>,
        tokens: Arc<TokenService>,
        posts: PostService,
        comments: CommentService,
    ) -> Self {
        Self {
            users,
            tokens,
            posts,
            comments,
        }
    }
}
