use crate::{
    error::{list_message, AppError, AppResult},
    model::{CommentPostPayload, CommentResp, CommentsResp},
    repo::{comments::NewComment, Store},
    service::{articles::article_not_found, parse_id},
};

pub async fn list_for_article(store: &dyn Store, raw_id: &str) -> AppResult<CommentsResp> {
    let article_id = parse_id(raw_id, "article")?;
    let rows = store.list_comments(article_id).await?;

    // an empty page is ambiguous until the article itself is checked
    if rows.is_empty() && !store.article_exists(article_id).await? {
        return Err(article_not_found());
    }

    Ok(CommentsResp {
        comments: rows.into_iter().map(Into::into).collect(),
    })
}

pub async fn create(
    store: &dyn Store,
    raw_id: &str,
    payload: CommentPostPayload,
) -> AppResult<CommentResp> {
    let article_id = parse_id(raw_id, "article")?;

    let username = payload.username.filter(|s| !s.trim().is_empty());
    let body = payload.body.filter(|s| !s.trim().is_empty());
    let (username, body) = match (username, body) {
        (Some(username), Some(body)) => (username, body),
        (username, body) => {
            let mut missing = Vec::new();
            if username.is_none() {
                missing.push("username".to_string());
            }
            if body.is_none() {
                missing.push("body".to_string());
            }
            return Err(AppError::BadRequest(list_message(
                "Missing field",
                "Missing fields",
                &missing,
            )));
        }
    };

    if !store.article_exists(article_id).await? {
        return Err(article_not_found());
    }
    if !store.user_exists(&username).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    let row = store
        .insert_comment(NewComment {
            article_id,
            author: username,
            body,
        })
        .await?;

    tracing::info!(
        comment_id = row.comment_id,
        article_id,
        author = %row.author,
        "comment created"
    );

    Ok(CommentResp {
        comment: row.into(),
    })
}

pub async fn delete(store: &dyn Store, raw_id: &str) -> AppResult<()> {
    let id = parse_id(raw_id, "comment")?;
    let affected = store.delete_comment(id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Comment not found".into()));
    }
    tracing::info!(comment_id = id, "comment deleted");
    Ok(())
}
