use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    Json,
};
use serde_json::Value;

use crate::{
    app::AppState,
    error::AppResult,
    model::{ArticleResp, ArticlesResp, UpdatedArticleResp},
    service,
};

pub async fn list_articles(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<ArticlesResp>> {
    let articles = service::articles::list(state.store.as_ref(), query.as_deref()).await?;
    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleResp>> {
    let article = service::articles::get(state.store.as_ref(), &article_id).await?;
    Ok(Json(article))
}

pub async fn patch_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<UpdatedArticleResp>> {
    // an absent or unreadable body carries no inc_votes
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(%rejection, "article patch body rejected");
            Value::Null
        }
    };
    let article =
        service::articles::update_votes(state.store.as_ref(), &article_id, payload).await?;
    Ok(Json(article))
}
