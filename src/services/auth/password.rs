/*
 * Responsibility
 * - パスワードの hash / verify (Argon2id)
 * - スキーム選択や salt 生成はライブラリに委譲。ここでは方式を固定するだけ
 */
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(rand::thread_rng());
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hashed)
}

/// 保存済み hash と照合する。hash が壊れている場合も認証失敗として扱う。
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
