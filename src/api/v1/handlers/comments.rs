/*
 * Responsibility
 * - /posts/{post_id}/comments と /comments/{comment_id} の handler
 * - 作成は post の存在チェック (service 側)、削除は所有チェック
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::comments::{CommentResponse, CreateCommentRequest},
        extractors::auth_ctx::AuthCtx,
    },
    error::AppError,
    repos::comment_repo::CommentRow,
    state::AppState,
};

pub(crate) fn row_to_response(row: CommentRow) -> CommentResponse {
    CommentResponse {
        id: row.comment_id,
        content: row.content,
        author_id: row.author_id,
        author_name: row.author_name,
        post_id: row.post_id,
        created_at: row.created_at,
    }
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = state.comments.list_by_post(post_id).await?;
    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}

pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthCtx,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_COMMENT", m))?;

    let row = state
        .comments
        .create(post_id, &req.content, auth.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthCtx,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.comments.delete(comment_id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
