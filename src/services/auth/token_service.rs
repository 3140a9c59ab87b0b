/*
 * Responsibility
 * - ログイン済みユーザーへの access token 発行 (issue)
 * - 提示されたトークンの検証 (validate / decode_verified)
 *
 * Notes
 * - 発行はステートレス。サーバー側に何も永続化しない。つまり expiry 前の
 *   revocation はできない (元システムの契約をそのまま維持)。
 * - validate は boolean 境界。失敗理由は warn ログに残すだけで、呼び出し側には
 *   valid / invalid しか返さない。
 */
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::repos::user_repo::UserRow;
use crate::services::auth::claims::{self, AccessTokenClaims, AccessTokenError, Caller};
use crate::services::auth::jwt::JwtCodec;

/// issue() の戻り値。handler はこれを LoginResponse にそのまま写す。
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct TokenService {
    jwt: JwtCodec,
}

impl TokenService {
    pub fn new(jwt: JwtCodec) -> Self {
        Self { jwt }
    }

    /// 認証済みユーザーに対してトークンを発行する。
    /// パスワード検証は呼び出し側 (login handler + credential store) の責務。
    pub fn issue(&self, user: &UserRow) -> Result<IssuedToken, AccessTokenError> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &UserRow, now: DateTime<Utc>) -> Result<IssuedToken, AccessTokenError> {
        let expires_at = now + Duration::minutes(self.jwt.ttl_minutes() as i64);

        let claims = AccessTokenClaims {
            iss: self.jwt.issuer().to_string(),
            aud: self.jwt.audience().to_string(),
            sub: user.id.to_string(),
            name: user.user_name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = self.jwt.sign(&claims)?;

        Ok(IssuedToken {
            user_id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            token,
            expires_at,
        })
    }

    /// トークンが有効かどうかだけを返す。
    /// 失敗理由 (署名不正 / 期限切れ / iss・aud 不一致 / claim 欠落) はログのみ。
    pub fn validate(&self, token: &str) -> bool {
        match self.decode_verified(token) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "access token rejected");
                false
            }
        }
    }

    /// middleware 向け: 検証 + Caller への変換までを一度にやる。
    pub fn decode_verified(&self, token: &str) -> Result<Caller, AccessTokenError> {
        let claims = self.jwt.decode(token)?;
        claims::extract_caller(&claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn service() -> TokenService {
        // leeway 0: 期限切れテストを決定的にする
        TokenService::new(JwtCodec::new(
            SECRET,
            "blog-api".to_string(),
            "blog-clients".to_string(),
            60,
            0,
        ))
    }

    fn alice() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
        }
    }

    /// JWT の一部分 (0 = header, 1 = payload, 2 = signature) の 1 byte を反転する
    fn tamper(token: &str, part: usize) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut bytes = URL_SAFE_NO_PAD.decode(&parts[part]).unwrap();
        bytes[0] ^= 0x01;
        parts[part] = URL_SAFE_NO_PAD.encode(bytes);
        parts.join(".")
    }

    #[test]
    fn issued_token_validates() {
        let svc = service();
        let issued = svc.issue(&alice()).unwrap();
        assert!(svc.validate(&issued.token));
    }

    #[test]
    fn expired_token_is_invalid() {
        let svc = service();
        // 発行時点を TTL (60 min) より十分過去にずらす
        let issued = svc
            .issue_at(&alice(), Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(!svc.validate(&issued.token));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let svc = service();
        let issued = svc.issue(&alice()).unwrap();
        assert!(!svc.validate(&tamper(&issued.token, 1)));
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let svc = service();
        let issued = svc.issue(&alice()).unwrap();
        assert!(!svc.validate(&tamper(&issued.token, 2)));
    }

    #[test]
    fn token_from_other_issuer_is_invalid() {
        let svc = service();
        let other = TokenService::new(JwtCodec::new(
            SECRET,
            "someone-else".to_string(),
            "blog-clients".to_string(),
            60,
            0,
        ));
        let issued = other.issue(&alice()).unwrap();
        assert!(!svc.validate(&issued.token));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let svc = service();
        let other = TokenService::new(JwtCodec::new(
            "another-secret-another-secret-another!",
            "blog-api".to_string(),
            "blog-clients".to_string(),
            60,
            0,
        ));
        let issued = other.issue(&alice()).unwrap();
        assert!(!svc.validate(&issued.token));
    }

    #[test]
    fn decode_verified_round_trips_identity() {
        let svc = service();
        let user = alice();
        let issued = svc.issue(&user).unwrap();

        let caller = svc.decode_verified(&issued.token).unwrap();
        assert_eq!(caller.user_id, user.id);
        assert_eq!(caller.user_name, user.user_name);
    }

    #[test]
    fn token_without_name_claim_is_rejected() {
        let svc = service();
        let mut user = alice();
        user.user_name = String::new();

        let issued = svc.issue(&user).unwrap();
        assert!(!svc.validate(&issued.token));

        let err = svc.decode_verified(&issued.token).unwrap_err();
        assert!(matches!(err, AccessTokenError::EmptyClaim("name")));
    }

    #[test]
    fn expires_at_reflects_configured_ttl() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.issue_at(&alice(), now).unwrap();
        assert_eq!(issued.expires_at, now + Duration::minutes(60));
    }
}
