use crate::{error::AppResult, model::UsersResp, repo::Store};

pub async fn list(store: &dyn Store) -> AppResult<UsersResp> {
    let rows = store.list_users().await?;
    Ok(UsersResp {
        users: rows.into_iter().map(Into::into).collect(),
    })
}
