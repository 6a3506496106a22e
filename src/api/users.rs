use axum::{extract::State, Json};

use crate::{app::AppState, error::AppResult, model::UsersResp, service};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResp>> {
    let users = service::users::list(state.store.as_ref()).await?;
    Ok(Json(users))
}
