use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub slug: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

pub async fn list_topics(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
    sqlx::query_as::<_, TopicRow>(
        r#"
        SELECT slug, description, img_url
        FROM topics
        ORDER BY slug
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn topic_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM topics WHERE slug = $1)
        "#,
    )
    .bind(slug)
    .fetch_one(pool)
    .await
}
