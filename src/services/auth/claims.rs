/*
 * Responsibility
 * - access token に載せる claim セットの定義
 * - 検証済み claim → Caller (呼び出し主体) への変換
 *
 * Notes
 * - extract_caller は「署名・iss/aud/exp の検証が済んだ claim」を前提とする。
 *   検証そのものは JwtCodec / TokenService 側の責務。
 * - ambient なリクエストコンテキストは持たない。claim セットを明示的に受け取り、
 *   identity-or-error を返すだけの関数にする。
 */
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub aud: String,
    /// Subject: user id (UUID string)
    pub sub: String,
    /// Subject display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubUuid,
}

/// 検証済みトークンから復元した呼び出し主体。
///
/// mutating endpoint はこの値だけを信用する。client が payload で送ってくる
/// author 系フィールドは一切使わない。
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Uuid,
    pub user_name: String,
}

/// claim セットから Caller を取り出す。`sub` / `name` のどちらかが欠けていれば
/// fail closed。
pub fn extract_caller(claims: &AccessTokenClaims) -> Result<Caller, AccessTokenError> {
    if claims.sub.trim().is_empty() {
        return Err(AccessTokenError::EmptyClaim("sub"));
    }
    if claims.name.trim().is_empty() {
        return Err(AccessTokenError::EmptyClaim("name"));
    }

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AccessTokenError::InvalidSubUuid)?;

    Ok(Caller {
        user_id,
        user_name: claims.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, name: &str) -> AccessTokenClaims {
        AccessTokenClaims {
            iss: "blog-api".into(),
            aud: "blog-clients".into(),
            sub: sub.into(),
            name: name.into(),
            email: "alice@example.com".into(),
            iat: 0,
            exp: i64::MAX,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn extracts_user_id_and_name() {
        let id = Uuid::new_v4();
        let caller = extract_caller(&claims(&id.to_string(), "alice")).unwrap();
        assert_eq!(caller.user_id, id);
        assert_eq!(caller.user_name, "alice");
    }

    #[test]
    fn missing_name_fails_closed() {
        let id = Uuid::new_v4();
        let err = extract_caller(&claims(&id.to_string(), "")).unwrap_err();
        assert!(matches!(err, AccessTokenError::EmptyClaim("name")));
    }

    #[test]
    fn missing_sub_fails_closed() {
        let err = extract_caller(&claims("", "alice")).unwrap_err();
        assert!(matches!(err, AccessTokenError::EmptyClaim("sub")));
    }

    #[test]
    fn non_uuid_sub_is_rejected() {
        let err = extract_caller(&claims("not-a-uuid", "alice")).unwrap_err();
        assert!(matches!(err, AccessTokenError::InvalidSubUuid));
    }
}
