//! access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` が付いていれば検証し、sub/name を AuthCtx
//!   として extensions に格納する。
//! - ヘッダが無いリクエストは匿名のまま通す。認証必須の handler は AuthCtx
//!   extractor 側で 401 を返す (元システムの「グローバル JWT ミドルウェア +
//!   endpoint ごとの Authorize」と同じ分担)。
//! - ヘッダが付いていて検証に失敗した場合は fail closed で 401。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、
    // `from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if let Some(auth) = auth {
        let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

        // 署名検証 + iss/aud/exp/claim チェックは TokenService 側で実施
        let caller = match state.tokens.decode_verified(token) {
            Ok(caller) => caller,
            Err(err) => {
                tracing::warn!(error = %err, "access token verification failed");
                return Err(AppError::Unauthorized);
            }
        };

        // middleware → extractor への受け渡し
        req.extensions_mut()
            .insert(AuthCtx::new(caller.user_id, caller.user_name));
    }

    Ok(next.run(req).await)
}
