/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - 認可が必要な操作は AuthCtx を受け取り、caller id を service に渡す
 * - 404 / 403 の振り分けは ServiceError → AppError の変換に任せる
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::posts::{CreatePostRequest, PostResponse, UpdatePostRequest},
        extractors::auth_ctx::AuthCtx,
    },
    error::AppError,
    repos::post_repo::PostRow,
    state::AppState,
};

pub(crate) fn row_to_response(row: PostRow) -> PostResponse {
    PostResponse {
        id: row.post_id,
        title: row.title,
        content: row.content,
        author_id: row.author_id,
        author_name: row.author_name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = state.posts.list(50, 0).await?;
    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, AppError> {
    let row = state.posts.get(post_id).await?;
    Ok(Json(row_to_response(row)))
}

pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthCtx,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_POST", m))?;

    let row = state
        .posts
        .create(&req.title, &req.content, auth.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthCtx,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_POST", m))?;

    let row = state
        .posts
        .update(
            post_id,
            req.title.as_deref(),
            req.content.as_deref(),
            auth.user_id,
        )
        .await?;

    Ok(Json(row_to_response(row)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthCtx,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.posts.delete(post_id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
