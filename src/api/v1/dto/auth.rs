/*
 * Responsibility
 * - Auth (register / login) の request/response DTO
 * - validation (形式チェック) は validate() に寄せる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_name.trim().is_empty() {
            return Err("user_name is required");
        }
        if self.user_name.len() > 64 {
            return Err("user_name must be <= 64 chars");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email is not valid");
        }
        if self.password.len() < 8 {
            return Err("password must be >= 8 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
}

/// 公開プロフィール。email は本人向けレスポンス (UserResponse) にだけ載せる
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
