/*
 * Responsibility
 * - HS256 (HMAC-SHA256) での JWT 署名・検証
 * - issuer / audience / exp / leeway の検証設定を一箇所に集約
 */
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::services::auth::claims::AccessTokenClaims;

#[derive(Clone)]
pub struct JwtCodec {
    issuer: String,
    audience: String,
    ttl_minutes: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtCodec")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtCodec {
    pub fn new(
        secret: &str,
        issuer: String,
        audience: String,
        ttl_minutes: u64,
        leeway_seconds: u64,
    ) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&issuer]);
        validation.set_audience(&[&audience]);
        validation.leeway = leeway_seconds;

        Self {
            issuer,
            audience,
            ttl_minutes,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_minutes
    }

    pub fn sign(&self, claims: &AccessTokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }

    /// 署名 + iss/aud/exp の検証込みで decode する。
    /// いずれかが不正なら Err (理由は jsonwebtoken のエラー)。
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;
        Ok(data.claims)
    }
}
