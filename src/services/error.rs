/*
 * Responsibility
 * - service 層が返す型付きエラー
 * - 「存在しない」と「所有者でない」を呼び出し側で区別できるようにする
 *   (boundary 層が 404 / 403 に振り分ける)
 */
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("caller is not the owner of this {0}")]
    NotAuthorized(&'static str),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
