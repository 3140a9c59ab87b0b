/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (CORS/認証/Trace など)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{
        comment_repo::{CommentRepo, PgCommentRepo},
        post_repo::{PgPostRepo, PostRepo},
        user_repo::{PgUserRepo, UserRepo},
    },
    services::{
        auth::{jwt::JwtCodec, token_service::TokenService},
        comments::CommentService,
        posts::PostService,
    },
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG があればそれを優先。無ければ控えめな default
    // Ex: RUST_LOG=info,blog_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr が見えない起動形態でも panic を見失わないように tracing へ
        tracing::error!(?info, "panic");

        // development では fail fast。production は default の挙動のまま
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let state = build_state(&config, pool);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config, pool: sqlx::PgPool) -> AppState {
    let jwt = JwtCodec::new(
        &config.auth_jwt_secret,
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.access_token_ttl_minutes,
        config.access_token_leeway_seconds,
    );
    let tokens = Arc::new(TokenService::new(jwt));

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let posts_repo: Arc<dyn PostRepo> = Arc::new(PgPostRepo::new(pool.clone()));
    let comments_repo: Arc<dyn CommentRepo> = Arc::new(PgCommentRepo::new(pool));

    AppState::new(
        users,
        tokens,
        PostService::new(posts_repo.clone()),
        CommentService::new(comments_repo, posts_repo),
    )
}

fn build_router(state: AppState, config: &Config) -> Router {
    let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());

    let app = Router::new().nest("/api/v1", v1).with_state(state);

    let app = middleware::cors::apply(app, config);
    middleware::http::apply(app, config)
}
