use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct TopicData {
    pub slug: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleData {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: Option<String>,
    /// Epoch milliseconds.
    pub created_at: Option<i64>,
    pub votes: Option<i32>,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentData {
    pub article_title: String,
    pub body: Option<String>,
    pub votes: Option<i32>,
    pub author: String,
    /// Epoch milliseconds.
    pub created_at: Option<i64>,
}

/// A full data set for the four tables.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub topics: Vec<TopicData>,
    pub users: Vec<UserData>,
    pub articles: Vec<ArticleData>,
    pub comments: Vec<CommentData>,
}

impl Fixtures {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            topics: read_json(&dir.join("topics.json"))?,
            users: read_json(&dir.join("users.json"))?,
            articles: read_json(&dir.join("articles.json"))?,
            comments: read_json(&dir.join("comments.json"))?,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read fixture {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse fixture {:?}", path))
}

pub fn convert_timestamp(millis: i64) -> anyhow::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("timestamp {millis} is out of range"))
}

/// Resolves an optional fixture timestamp, falling back to `now`.
pub fn created_at_or(millis: Option<i64>, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    millis.map(convert_timestamp).transpose().map(|ts| ts.unwrap_or(now))
}

/// Title to article id lookup built from inserted article rows.
pub fn create_reference<'a, I>(rows: I) -> HashMap<String, i32>
where
    I: IntoIterator<Item = (i32, &'a str)>,
{
    rows.into_iter()
        .map(|(id, title)| (title.to_string(), id))
        .collect()
}

pub fn resolve_article_id(reference: &HashMap<String, i32>, title: &str) -> anyhow::Result<i32> {
    reference
        .get(title)
        .copied()
        .ok_or_else(|| anyhow!("comment references unknown article {title:?}"))
}

#[cfg(test)]
pub fn test_fixtures() -> Fixtures {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/test");
    Fixtures::load(&dir).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn convert_timestamp_reads_epoch_millis() {
        let ts = convert_timestamp(1_594_329_060_000).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 7, 9, 21, 11, 0).unwrap());
    }

    #[test]
    fn missing_timestamp_uses_fallback() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(created_at_or(None, now).unwrap(), now);
        assert_ne!(created_at_or(Some(0), now).unwrap(), now);
    }

    #[test]
    fn out_of_range_timestamp_is_an_error() {
        assert!(convert_timestamp(i64::MAX).is_err());
    }

    #[test]
    fn reference_of_nothing_is_empty() {
        let reference = create_reference(Vec::<(i32, &str)>::new());
        assert!(reference.is_empty());
    }

    #[test]
    fn reference_maps_titles_to_ids() {
        let reference = create_reference(vec![
            (1, "Living in the shadow of a great man"),
            (2, "Sony Vaio; or, The Laptop"),
        ]);
        assert_eq!(reference.len(), 2);
        assert_eq!(
            resolve_article_id(&reference, "Sony Vaio; or, The Laptop").unwrap(),
            2
        );
        assert!(resolve_article_id(&reference, "Not an article").is_err());
    }

    #[test]
    fn test_data_is_consistent() {
        let fixtures = test_fixtures();
        assert_eq!(fixtures.topics.len(), 3);
        assert_eq!(fixtures.users.len(), 4);
        assert_eq!(fixtures.articles.len(), 13);
        assert_eq!(fixtures.comments.len(), 18);

        let mitch = fixtures.articles.iter().filter(|a| a.topic == "mitch").count();
        assert_eq!(mitch, 12);
        assert!(!fixtures.articles.iter().any(|a| a.topic == "paper"));

        let reference = create_reference(
            fixtures
                .articles
                .iter()
                .enumerate()
                .map(|(idx, a)| (idx as i32 + 1, a.title.as_str())),
        );
        for comment in &fixtures.comments {
            resolve_article_id(&reference, &comment.article_title).unwrap();
        }
    }
}
