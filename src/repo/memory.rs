//! In-process `Store` used by handler tests.

use std::{
    cmp::Ordering,
    sync::{
        atomic::{AtomicBool, Ordering as AtomicOrdering},
        Mutex, MutexGuard,
    },
};

use async_trait::async_trait;
use chrono::Utc;

use super::{
    articles::{ArticleListing, ArticleRow, ArticleSummaryRow, SortColumn, SortOrder},
    comments::{CommentRow, NewComment},
    topics::TopicRow,
    users::UserRow,
    Store,
};
use crate::fixtures::{self, Fixtures};

#[derive(Default)]
struct Tables {
    topics: Vec<TopicRow>,
    users: Vec<UserRow>,
    articles: Vec<ArticleRow>,
    comments: Vec<CommentRow>,
    next_comment_id: i32,
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn from_fixtures(data: &Fixtures) -> anyhow::Result<Self> {
        let now = Utc::now();
        let mut tables = Tables {
            topics: data
                .topics
                .iter()
                .map(|t| TopicRow {
                    slug: t.slug.clone(),
                    description: t.description.clone(),
                    img_url: t.img_url.clone(),
                })
                .collect(),
            users: data
                .users
                .iter()
                .map(|u| UserRow {
                    username: u.username.clone(),
                    name: u.name.clone(),
                    avatar_url: u.avatar_url.clone(),
                })
                .collect(),
            ..Tables::default()
        };

        for (idx, article) in data.articles.iter().enumerate() {
            tables.articles.push(ArticleRow {
                article_id: idx as i32 + 1,
                author: article.author.clone(),
                title: article.title.clone(),
                topic: article.topic.clone(),
                body: article.body.clone(),
                created_at: fixtures::created_at_or(article.created_at, now)?,
                votes: article.votes.unwrap_or(0),
                article_img_url: article.article_img_url.clone(),
                comment_count: 0,
            });
        }

        let reference = fixtures::create_reference(
            tables
                .articles
                .iter()
                .map(|a| (a.article_id, a.title.as_str())),
        );

        for (idx, comment) in data.comments.iter().enumerate() {
            tables.comments.push(CommentRow {
                comment_id: idx as i32 + 1,
                article_id: fixtures::resolve_article_id(&reference, &comment.article_title)?,
                body: comment.body.clone(),
                votes: comment.votes.unwrap_or(0),
                author: comment.author.clone(),
                created_at: fixtures::created_at_or(comment.created_at, now)?,
            });
        }
        tables.next_comment_id = tables.comments.len() as i32 + 1;

        Ok(Self {
            tables: Mutex::new(tables),
            failing: AtomicBool::new(false),
        })
    }

    /// Makes every following call fail as if the database were gone.
    pub fn fail_all(&self) {
        self.failing.store(true, AtomicOrdering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, sqlx::Error> {
        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(self.tables.lock().unwrap())
    }
}

impl Tables {
    fn comment_count(&self, article_id: i32) -> i64 {
        self.comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .count() as i64
    }

    fn article(&self, id: i32) -> Option<ArticleRow> {
        self.articles.iter().find(|a| a.article_id == id).map(|a| ArticleRow {
            comment_count: self.comment_count(id),
            ..a.clone()
        })
    }
}

fn compare(column: SortColumn, a: &ArticleSummaryRow, b: &ArticleSummaryRow) -> Ordering {
    match column {
        SortColumn::ArticleId => a.article_id.cmp(&b.article_id),
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Topic => a.topic.cmp(&b.topic),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Votes => a.votes.cmp(&b.votes),
        SortColumn::CommentCount => a.comment_count.cmp(&b.comment_count),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_topics(&self) -> Result<Vec<TopicRow>, sqlx::Error> {
        let mut topics = self.tables()?.topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        Ok(self.tables()?.topics.iter().any(|t| t.slug == slug))
    }

    async fn list_users(&self) -> Result<Vec<UserRow>, sqlx::Error> {
        let mut users = self.tables()?.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn user_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        Ok(self.tables()?.users.iter().any(|u| u.username == username))
    }

    async fn list_articles(
        &self,
        listing: &ArticleListing,
    ) -> Result<Vec<ArticleSummaryRow>, sqlx::Error> {
        let tables = self.tables()?;
        let mut rows: Vec<ArticleSummaryRow> = tables
            .articles
            .iter()
            .filter(|a| listing.topic.as_ref().map_or(true, |t| &a.topic == t))
            .map(|a| ArticleSummaryRow {
                article_id: a.article_id,
                author: a.author.clone(),
                title: a.title.clone(),
                topic: a.topic.clone(),
                created_at: a.created_at,
                votes: a.votes,
                article_img_url: a.article_img_url.clone(),
                comment_count: tables.comment_count(a.article_id),
            })
            .collect();

        rows.sort_by(|a, b| {
            let primary = compare(listing.sort_by, a, b);
            let primary = match listing.order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then(a.article_id.cmp(&b.article_id))
        });
        Ok(rows)
    }

    async fn get_article(&self, id: i32) -> Result<Option<ArticleRow>, sqlx::Error> {
        Ok(self.tables()?.article(id))
    }

    async fn article_exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.tables()?.articles.iter().any(|a| a.article_id == id))
    }

    async fn increment_votes(
        &self,
        id: i32,
        inc_votes: i32,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let mut tables = self.tables()?;
        match tables.articles.iter_mut().find(|a| a.article_id == id) {
            Some(article) => article.votes += inc_votes,
            None => return Ok(None),
        }
        Ok(tables.article(id))
    }

    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentRow>, sqlx::Error> {
        let mut comments: Vec<CommentRow> = self
            .tables()?
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.comment_id.cmp(&a.comment_id))
        });
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<CommentRow, sqlx::Error> {
        let mut tables = self.tables()?;
        let row = CommentRow {
            comment_id: tables.next_comment_id,
            article_id: comment.article_id,
            body: Some(comment.body),
            votes: 0,
            author: comment.author,
            created_at: Utc::now(),
        };
        tables.next_comment_id += 1;
        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, id: i32) -> Result<u64, sqlx::Error> {
        let mut tables = self.tables()?;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != id);
        Ok((before - tables.comments.len()) as u64)
    }
}
