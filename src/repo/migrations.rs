use sqlx::{PgConnection, PgPool};
use tracing::info;

const CREATE_TOPICS: &str = r#"
CREATE TABLE IF NOT EXISTS topics (
  slug         VARCHAR PRIMARY KEY,
  description  VARCHAR(300),
  img_url      VARCHAR(1000)
);
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  username     VARCHAR(500) PRIMARY KEY,
  name         VARCHAR(200),
  avatar_url   VARCHAR(1000)
);
"#;

const CREATE_ARTICLES: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
  article_id       SERIAL PRIMARY KEY,
  title            VARCHAR(300) NOT NULL,
  topic            VARCHAR(300) NOT NULL REFERENCES topics(slug),
  author           VARCHAR(500) NOT NULL REFERENCES users(username),
  body             TEXT,
  created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
  votes            INTEGER NOT NULL DEFAULT 0,
  article_img_url  VARCHAR(1000)
);
"#;

const CREATE_COMMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
  comment_id   SERIAL PRIMARY KEY,
  article_id   INTEGER NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
  body         TEXT,
  votes        INTEGER NOT NULL DEFAULT 0,
  author       VARCHAR(500) NOT NULL REFERENCES users(username),
  created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_articles_topic ON articles(topic);",
    "CREATE INDEX IF NOT EXISTS idx_comments_article_id ON comments(article_id);",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    create_tables(&mut tx).await?;
    tx.commit().await?;
    info!("database schema ready");
    Ok(())
}

/// Creates every table in foreign-key order. Safe to run against an
/// existing schema.
pub async fn create_tables(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for statement in [CREATE_TOPICS, CREATE_USERS, CREATE_ARTICLES, CREATE_COMMENTS] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

pub async fn drop_tables(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for table in ["comments", "articles", "users", "topics"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
