use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    model::{CommentPostPayload, CommentResp, CommentsResp},
    service,
};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<CommentsResp>> {
    let comments =
        service::comments::list_for_article(state.store.as_ref(), &article_id).await?;
    Ok(Json(comments))
}

pub async fn post_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    payload: Result<Json<CommentPostPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentResp>)> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => CommentPostPayload::default(),
        Err(rejection) => {
            tracing::debug!(%rejection, "comment body rejected");
            return Err(AppError::BadRequest("Invalid request body".into()));
        }
    };
    let comment = service::comments::create(state.store.as_ref(), &article_id, payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<StatusCode> {
    service::comments::delete(state.store.as_ref(), &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
