pub mod articles;
pub mod comments;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod seed;
pub mod topics;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;

use self::{
    articles::{ArticleListing, ArticleRow, ArticleSummaryRow},
    comments::{CommentRow, NewComment},
    topics::TopicRow,
    users::UserRow,
};

/// Storage operations the HTTP layer depends on. Handlers only ever see this
/// trait, so any backend (or a test double) can be plugged into `AppState`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<TopicRow>, sqlx::Error>;
    async fn topic_exists(&self, slug: &str) -> Result<bool, sqlx::Error>;

    async fn list_users(&self) -> Result<Vec<UserRow>, sqlx::Error>;
    async fn user_exists(&self, username: &str) -> Result<bool, sqlx::Error>;

    async fn list_articles(
        &self,
        listing: &ArticleListing,
    ) -> Result<Vec<ArticleSummaryRow>, sqlx::Error>;
    async fn get_article(&self, id: i32) -> Result<Option<ArticleRow>, sqlx::Error>;
    async fn article_exists(&self, id: i32) -> Result<bool, sqlx::Error>;
    async fn increment_votes(
        &self,
        id: i32,
        inc_votes: i32,
    ) -> Result<Option<ArticleRow>, sqlx::Error>;

    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentRow>, sqlx::Error>;
    async fn insert_comment(&self, comment: NewComment) -> Result<CommentRow, sqlx::Error>;
    async fn delete_comment(&self, id: i32) -> Result<u64, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_topics(&self) -> Result<Vec<TopicRow>, sqlx::Error> {
        topics::list_topics(&self.pool).await
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        topics::topic_exists(&self.pool, slug).await
    }

    async fn list_users(&self) -> Result<Vec<UserRow>, sqlx::Error> {
        users::list_users(&self.pool).await
    }

    async fn user_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        users::user_exists(&self.pool, username).await
    }

    async fn list_articles(
        &self,
        listing: &ArticleListing,
    ) -> Result<Vec<ArticleSummaryRow>, sqlx::Error> {
        articles::list_articles(&self.pool, listing).await
    }

    async fn get_article(&self, id: i32) -> Result<Option<ArticleRow>, sqlx::Error> {
        articles::get_article(&self.pool, id).await
    }

    async fn article_exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        articles::article_exists(&self.pool, id).await
    }

    async fn increment_votes(
        &self,
        id: i32,
        inc_votes: i32,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        articles::increment_votes(&self.pool, id, inc_votes).await
    }

    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentRow>, sqlx::Error> {
        comments::list_comments(&self.pool, article_id).await
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<CommentRow, sqlx::Error> {
        comments::insert_comment(&self.pool, comment).await
    }

    async fn delete_comment(&self, id: i32) -> Result<u64, sqlx::Error> {
        comments::delete_comment(&self.pool, id).await
    }
}
