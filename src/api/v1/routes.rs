/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /posts, /comments, /authors
 * - 認証が必要な操作は handler 側の AuthCtx extractor で弾く
 *   (middleware は検証済み identity を extensions に載せるだけ)
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, register},
    authors::{get_author, list_comments_by_author, list_posts_by_author},
    comments::{create_comment, delete_comment, list_comments},
    health::health,
    posts::{create_post, delete_post, get_post, list_posts, update_post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/{post_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/comments/{comment_id}", delete(delete_comment))
        .route("/authors/{author_id}", get(get_author))
        .route("/authors/{author_id}/posts", get(list_posts_by_author))
        .route(
            "/authors/{author_id}/comments",
            get(list_comments_by_author),
        )
}
