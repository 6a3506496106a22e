use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: i32,
    pub article_id: i32,
    pub body: Option<String>,
    pub votes: i32,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}

pub async fn list_comments(pool: &PgPool, article_id: i32) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT comment_id, article_id, body, votes, author, created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY created_at DESC, comment_id DESC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_comment(pool: &PgPool, comment: NewComment) -> Result<CommentRow, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO comments (article_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING comment_id, article_id, body, votes, author, created_at
        "#,
    )
    .bind(comment.article_id)
    .bind(comment.author)
    .bind(comment.body)
    .fetch_one(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM comments
        WHERE comment_id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map(|res| res.rows_affected())
}
