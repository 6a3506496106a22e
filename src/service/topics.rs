use crate::{error::AppResult, model::TopicsResp, repo::Store};

pub async fn list(store: &dyn Store) -> AppResult<TopicsResp> {
    let rows = store.list_topics().await?;
    tracing::debug!(count = rows.len(), "topics listed");
    Ok(TopicsResp {
        topics: rows.into_iter().map(Into::into).collect(),
    })
}
