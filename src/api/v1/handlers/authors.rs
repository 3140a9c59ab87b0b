/*
 * Responsibility
 * - /authors 系の公開 read handler
 * - プロフィール・投稿一覧・コメント一覧。すべて認証不要
 */
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::auth::AuthorResponse,
        dto::comments::CommentResponse,
        dto::posts::PostResponse,
        handlers::{comments, posts},
    },
    error::AppError,
    state::AppState,
};

pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<AuthorResponse>, AppError> {
    let user = state
        .users
        .find_by_id(author_id)
        .await?
        .ok_or(AppError::not_found("author"))?;

    Ok(Json(AuthorResponse {
        id: user.id,
        user_name: user.user_name,
    }))
}

pub async fn list_posts_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = state.posts.list_by_author(author_id).await?;
    Ok(Json(rows.into_iter().map(posts::row_to_response).collect()))
}

pub async fn list_comments_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = state.comments.list_by_author(author_id).await?;
    Ok(Json(
        rows.into_iter().map(comments::row_to_response).collect(),
    ))
}
