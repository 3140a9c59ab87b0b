/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - AuthCtx が extensions に無い = 認証されていない → 401
 */
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` / `user_name` は検証済みトークンの claim 由来
/// - mutating endpoint はこの値以外から caller を知ってはいけない
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub user_name: String,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, user_name: String) -> Self {
        Self { user_id, user_name }
    }
}

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
