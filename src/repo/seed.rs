use anyhow::Context;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::{
    fixtures::{self, Fixtures},
    repo::migrations,
};

/// Rebuilds all tables from scratch and loads `data` into them in one
/// transaction.
pub async fn seed(pool: &PgPool, data: &Fixtures) -> anyhow::Result<()> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    migrations::drop_tables(&mut tx)
        .await
        .context("failed to drop tables")?;
    migrations::create_tables(&mut tx)
        .await
        .context("failed to create tables")?;

    if !data.topics.is_empty() {
        let mut qb =
            QueryBuilder::<Postgres>::new("INSERT INTO topics (slug, description, img_url) ");
        qb.push_values(&data.topics, |mut row, topic| {
            row.push_bind(&topic.slug)
                .push_bind(&topic.description)
                .push_bind(&topic.img_url);
        });
        qb.build().execute(&mut *tx).await.context("failed to insert topics")?;
    }

    if !data.users.is_empty() {
        let mut qb =
            QueryBuilder::<Postgres>::new("INSERT INTO users (username, name, avatar_url) ");
        qb.push_values(&data.users, |mut row, user| {
            row.push_bind(&user.username)
                .push_bind(&user.name)
                .push_bind(&user.avatar_url);
        });
        qb.build().execute(&mut *tx).await.context("failed to insert users")?;
    }

    let mut inserted: Vec<(i32, String)> = Vec::new();
    if !data.articles.is_empty() {
        let mut articles = Vec::with_capacity(data.articles.len());
        for article in &data.articles {
            articles.push((article, fixtures::created_at_or(article.created_at, now)?));
        }

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO articles (title, topic, author, body, created_at, votes, article_img_url) ",
        );
        qb.push_values(&articles, |mut row, (article, created_at)| {
            row.push_bind(&article.title)
                .push_bind(&article.topic)
                .push_bind(&article.author)
                .push_bind(&article.body)
                .push_bind(*created_at)
                .push_bind(article.votes.unwrap_or(0))
                .push_bind(&article.article_img_url);
        });
        qb.push(" RETURNING article_id, title");
        inserted = qb
            .build_query_as::<(i32, String)>()
            .fetch_all(&mut *tx)
            .await
            .context("failed to insert articles")?;
    }

    let reference =
        fixtures::create_reference(inserted.iter().map(|(id, title)| (*id, title.as_str())));

    if !data.comments.is_empty() {
        let mut comments = Vec::with_capacity(data.comments.len());
        for comment in &data.comments {
            comments.push((
                comment,
                fixtures::resolve_article_id(&reference, &comment.article_title)?,
                fixtures::created_at_or(comment.created_at, now)?,
            ));
        }

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO comments (article_id, body, votes, author, created_at) ",
        );
        qb.push_values(&comments, |mut row, (comment, article_id, created_at)| {
            row.push_bind(*article_id)
                .push_bind(&comment.body)
                .push_bind(comment.votes.unwrap_or(0))
                .push_bind(&comment.author)
                .push_bind(*created_at);
        });
        qb.build().execute(&mut *tx).await.context("failed to insert comments")?;
    }

    tx.commit().await?;

    info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "database seeded"
    );

    Ok(())
}
