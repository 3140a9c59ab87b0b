/*
 * Responsibility
 * - POST /auth/register, /auth/login
 * - register: validation → password hash → users insert (重複 email は 409)
 * - login: credential 照合 → TokenService で発行 → LoginResponse
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    error::AppError,
    repos::error::RepoError,
    services::auth::password,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REGISTRATION", m))?;

    let password_hash = password::hash(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    })?;

    let row = state
        .users
        .insert(req.user_name.trim(), req.email.trim(), &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("email already registered"),
            other => AppError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: row.id,
            user_name: row.user_name,
            email: row.email,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_LOGIN", m))?;

    // email 不明とパスワード不一致は同じ 401 (列挙攻撃対策で区別しない)
    let user = state
        .users
        .find_by_email(req.email.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let issued = state.tokens.issue(&user).map_err(|e| {
        tracing::error!(error = %e, "token issuance failed");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse {
        user_id: issued.user_id,
        user_name: issued.user_name,
        email: issued.email,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
