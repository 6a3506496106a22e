use std::{sync::Arc, time::Duration};

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api,
    config::{AppConfig, DbConfig},
    middleware::assign_trace_id,
    repo::{self, PgStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

pub async fn connect(db: &DbConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&db.url)
        .await?;
    Ok(pool)
}

pub async fn build_router(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = connect(&config.db).await?;
    repo::migrations::ensure_schema(&pool).await?;

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    Ok(router(state))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let middleware = ServiceBuilder::new()
        .layer(middleware::from_fn(assign_trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        .route("/healthz", get(api::health::health_check))
        .route("/api", get(api::docs::list_endpoints))
        .route("/api/topics", get(api::topics::list_topics))
        .route("/api/users", get(api::users::list_users))
        .route("/api/articles", get(api::articles::list_articles))
        .route(
            "/api/articles/:article_id",
            get(api::articles::get_article).patch(api::articles::patch_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(api::comments::list_comments).post(api::comments::post_comment),
        )
        .route(
            "/api/comments/:comment_id",
            delete(api::comments::delete_comment),
        )
        .fallback(api::not_found)
        .layer(middleware)
        .with_state(state)
}
