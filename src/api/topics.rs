use axum::{extract::State, Json};

use crate::{app::AppState, error::AppResult, model::TopicsResp, service};

pub async fn list_topics(State(state): State<AppState>) -> AppResult<Json<TopicsResp>> {
    let topics = service::topics::list(state.store.as_ref()).await?;
    Ok(Json(topics))
}
