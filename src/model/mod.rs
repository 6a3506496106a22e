use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::repo::{
    articles::{ArticleRow, ArticleSummaryRow},
    comments::CommentRow,
    topics::TopicRow,
    users::UserRow,
};

#[derive(Debug, Serialize)]
pub struct TopicOut {
    pub slug: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Listing projection of an article; carries no body.
#[derive(Debug, Serialize)]
pub struct ArticleSummaryOut {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ArticleOut {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub body: Option<String>,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub comment_id: i32,
    pub article_id: i32,
    pub body: Option<String>,
    pub votes: i32,
    pub author: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct TopicsResp {
    pub topics: Vec<TopicOut>,
}

#[derive(Debug, Serialize)]
pub struct UsersResp {
    pub users: Vec<UserOut>,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResp {
    pub articles: Vec<ArticleSummaryOut>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResp {
    pub article: ArticleOut,
}

#[derive(Debug, Serialize)]
pub struct UpdatedArticleResp {
    #[serde(rename = "updatedArticle")]
    pub updated_article: ArticleOut,
}

#[derive(Debug, Serialize)]
pub struct CommentsResp {
    pub comments: Vec<CommentOut>,
}

#[derive(Debug, Serialize)]
pub struct CommentResp {
    pub comment: CommentOut,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentPostPayload {
    pub username: Option<String>,
    pub body: Option<String>,
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<TopicRow> for TopicOut {
    fn from(row: TopicRow) -> Self {
        Self {
            slug: row.slug,
            description: row.description,
            img_url: row.img_url,
        }
    }
}

impl From<UserRow> for UserOut {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            name: row.name,
            avatar_url: row.avatar_url,
        }
    }
}

impl From<ArticleSummaryRow> for ArticleSummaryOut {
    fn from(row: ArticleSummaryRow) -> Self {
        Self {
            article_id: row.article_id,
            author: row.author,
            title: row.title,
            topic: row.topic,
            created_at: format_timestamp(row.created_at),
            votes: row.votes,
            article_img_url: row.article_img_url,
            comment_count: row.comment_count,
        }
    }
}

impl From<ArticleRow> for ArticleOut {
    fn from(row: ArticleRow) -> Self {
        Self {
            article_id: row.article_id,
            author: row.author,
            title: row.title,
            topic: row.topic,
            body: row.body,
            created_at: format_timestamp(row.created_at),
            votes: row.votes,
            article_img_url: row.article_img_url,
            comment_count: row.comment_count,
        }
    }
}

impl From<CommentRow> for CommentOut {
    fn from(row: CommentRow) -> Self {
        Self {
            comment_id: row.comment_id,
            article_id: row.article_id,
            body: row.body,
            votes: row.votes,
            author: row.author,
            created_at: format_timestamp(row.created_at),
        }
    }
}

/// Raw `GET /api/articles` query values, before whitelist validation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}
