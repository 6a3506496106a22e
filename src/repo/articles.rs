use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// One row of the article listing. `body` is not part of this projection.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleSummaryRow {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

/// Columns the listing may be ordered by. Only these ever reach the
/// `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    ArticleId,
    Author,
    Title,
    Topic,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::ArticleId,
        SortColumn::Author,
        SortColumn::Title,
        SortColumn::Topic,
        SortColumn::CreatedAt,
        SortColumn::Votes,
        SortColumn::CommentCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "article_id",
            SortColumn::Author => "author",
            SortColumn::Title => "title",
            SortColumn::Topic => "topic",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::CommentCount => "comment_count",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.as_str() == key)
    }

    fn sql(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "articles.article_id",
            SortColumn::Author => "articles.author",
            SortColumn::Title => "articles.title",
            SortColumn::Topic => "articles.topic",
            SortColumn::CreatedAt => "articles.created_at",
            SortColumn::Votes => "articles.votes",
            // aggregate alias, not a table column
            SortColumn::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated inputs of the article listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListing {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
}

/// SQL text plus its positional bind values, in `$n` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterizedQuery {
    pub sql: String,
    pub binds: Vec<String>,
}

const LISTING_SELECT: &str = "SELECT articles.article_id, \
articles.author, \
articles.title, \
articles.topic, \
articles.created_at, \
articles.votes, \
articles.article_img_url, \
COUNT(comments.comment_id) AS comment_count \
FROM articles \
LEFT JOIN comments ON comments.article_id = articles.article_id";

impl ArticleListing {
    pub fn build(&self) -> ParameterizedQuery {
        let mut sql = String::from(LISTING_SELECT);
        let mut binds = Vec::new();

        if let Some(topic) = &self.topic {
            binds.push(topic.clone());
            sql.push_str(&format!(" WHERE articles.topic = ${}", binds.len()));
        }

        sql.push_str(" GROUP BY articles.article_id");
        sql.push_str(&format!(
            " ORDER BY {} {}",
            self.sort_by.sql(),
            self.order.as_sql()
        ));
        // deterministic order among equal sort keys
        if self.sort_by != SortColumn::ArticleId {
            sql.push_str(", articles.article_id ASC");
        }

        ParameterizedQuery { sql, binds }
    }
}

pub async fn list_articles(
    pool: &PgPool,
    listing: &ArticleListing,
) -> Result<Vec<ArticleSummaryRow>, sqlx::Error> {
    let query = listing.build();
    let mut rows = sqlx::query_as::<_, ArticleSummaryRow>(&query.sql);
    for value in &query.binds {
        rows = rows.bind(value);
    }
    rows.fetch_all(pool).await
}

pub async fn get_article(pool: &PgPool, id: i32) -> Result<Option<ArticleRow>, sqlx::Error> {
    sqlx::query_as::<_, ArticleRow>(
        r#"
        SELECT articles.article_id,
               articles.author,
               articles.title,
               articles.topic,
               articles.body,
               articles.created_at,
               articles.votes,
               articles.article_img_url,
               COUNT(comments.comment_id) AS comment_count
        FROM articles
        LEFT JOIN comments ON comments.article_id = articles.article_id
        WHERE articles.article_id = $1
        GROUP BY articles.article_id
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn article_exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM articles WHERE article_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn increment_votes(
    pool: &PgPool,
    id: i32,
    inc_votes: i32,
) -> Result<Option<ArticleRow>, sqlx::Error> {
    let updated = sqlx::query(
        r#"
        UPDATE articles
        SET votes = votes + $2
        WHERE article_id = $1
        "#,
    )
    .bind(id)
    .bind(inc_votes)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(None);
    }

    get_article(pool, id).await
}
