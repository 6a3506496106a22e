use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    model::{ArticleListQuery, ArticleResp, ArticlesResp, UpdatedArticleResp},
    repo::{
        articles::{ArticleListing, SortColumn, SortOrder},
        Store,
    },
    service::parse_id,
};

const LIST_PARAMS: [&str; 3] = ["sort_by", "order", "topic"];

/// Splits a raw query string into the known listing parameters. Unknown
/// keys are collected in order of first appearance and rejected together.
/// A repeated known key keeps its first value.
pub fn parse_list_query(raw: Option<&str>) -> AppResult<ArticleListQuery> {
    let mut query = ArticleListQuery::default();
    let mut unknown: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        let slot = match &*key {
            "sort_by" => &mut query.sort_by,
            "order" => &mut query.order,
            "topic" => &mut query.topic,
            _ => {
                // a bare `=value` still has to name something in the message
                let name = if key.is_empty() {
                    "\"\"".to_string()
                } else {
                    key.to_string()
                };
                if !unknown.contains(&name) {
                    unknown.push(name);
                }
                continue;
            }
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    if !unknown.is_empty() {
        tracing::debug!(?unknown, allowed = ?LIST_PARAMS, "rejected article list query");
        return Err(AppError::InvalidQueryParameter(unknown));
    }

    Ok(query)
}

/// Topic slugs are restricted to ASCII letters, digits, `-` and `_`.
pub fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Checks `sort_by` against the column whitelist and `order` against
/// ASC/DESC (any case). `sort_by` is checked first.
pub fn validate_sort(
    sort_by: Option<&str>,
    order: Option<&str>,
) -> AppResult<(SortColumn, SortOrder)> {
    let sort_by = match sort_by {
        Some(key) => SortColumn::from_key(key).ok_or(AppError::InvalidSortQuery)?,
        None => SortColumn::CreatedAt,
    };
    let order = match order {
        Some(key) => SortOrder::from_key(key).ok_or(AppError::InvalidOrderQuery)?,
        None => SortOrder::Desc,
    };
    Ok((sort_by, order))
}

pub async fn list(store: &dyn Store, raw_query: Option<&str>) -> AppResult<ArticlesResp> {
    let ArticleListQuery {
        sort_by,
        order,
        topic,
    } = parse_list_query(raw_query)?;

    if let Some(topic) = topic.as_deref() {
        if !is_valid_topic(topic) {
            return Err(AppError::InvalidTopicFormat);
        }
    }

    let (sort_by, order) = validate_sort(sort_by.as_deref(), order.as_deref())?;
    let listing = ArticleListing {
        sort_by,
        order,
        topic,
    };

    let rows = store.list_articles(&listing).await?;

    if rows.is_empty() {
        if let Some(topic) = listing.topic.as_deref() {
            if !store.topic_exists(topic).await? {
                return Err(AppError::TopicNotFound);
            }
        }
    }

    tracing::debug!(
        sort_by = sort_by.as_str(),
        order = order.as_sql(),
        topic = listing.topic.as_deref(),
        count = rows.len(),
        "articles list queried"
    );

    Ok(ArticlesResp {
        articles: rows.into_iter().map(Into::into).collect(),
    })
}

pub async fn get(store: &dyn Store, raw_id: &str) -> AppResult<ArticleResp> {
    let id = parse_id(raw_id, "article")?;
    let article = store
        .get_article(id)
        .await?
        .ok_or_else(article_not_found)?;
    Ok(ArticleResp {
        article: article.into(),
    })
}

pub async fn update_votes(
    store: &dyn Store,
    raw_id: &str,
    payload: Value,
) -> AppResult<UpdatedArticleResp> {
    let id = parse_id(raw_id, "article")?;
    let inc_votes = parse_inc_votes(&payload)?;

    let article = store
        .increment_votes(id, inc_votes)
        .await?
        .ok_or_else(article_not_found)?;

    tracing::info!(article_id = id, inc_votes, votes = article.votes, "article votes updated");

    Ok(UpdatedArticleResp {
        updated_article: article.into(),
    })
}

fn parse_inc_votes(payload: &Value) -> AppResult<i32> {
    match payload.get("inc_votes") {
        None | Some(Value::Null) => Err(AppError::BadRequest("Missing 'inc_votes' key".into())),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| {
                AppError::BadRequest("Invalid value for 'inc_votes': expected a number".into())
            }),
    }
}

pub(crate) fn article_not_found() -> AppError {
    AppError::NotFound("Article not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_created_at_desc() {
        let (sort_by, order) = validate_sort(None, None).unwrap();
        assert_eq!(sort_by, SortColumn::CreatedAt);
        assert_eq!(order, SortOrder::Desc);
    }

    #[test]
    fn accepts_every_whitelisted_column() {
        for key in [
            "article_id",
            "author",
            "title",
            "topic",
            "created_at",
            "votes",
            "comment_count",
        ] {
            let (sort_by, _) = validate_sort(Some(key), None).unwrap();
            assert_eq!(sort_by.as_str(), key);
        }
    }

    #[test]
    fn rejects_unknown_column() {
        for key in ["body", "article_img_url", "votes; DROP TABLE articles", ""] {
            assert!(matches!(
                validate_sort(Some(key), None),
                Err(AppError::InvalidSortQuery)
            ));
        }
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!(validate_sort(None, Some("asc")).unwrap().1, SortOrder::Asc);
        assert_eq!(validate_sort(None, Some("Desc")).unwrap().1, SortOrder::Desc);
        assert!(matches!(
            validate_sort(Some("votes"), Some("sideways")),
            Err(AppError::InvalidOrderQuery)
        ));
    }

    #[test]
    fn sort_error_wins_over_order_error() {
        assert!(matches!(
            validate_sort(Some("nope"), Some("nope")),
            Err(AppError::InvalidSortQuery)
        ));
    }

    #[test]
    fn parses_known_parameters() {
        let query = parse_list_query(Some("sort_by=votes&order=asc&topic=mitch")).unwrap();
        assert_eq!(
            query,
            ArticleListQuery {
                sort_by: Some("votes".into()),
                order: Some("asc".into()),
                topic: Some("mitch".into()),
            }
        );
        assert_eq!(parse_list_query(None).unwrap(), ArticleListQuery::default());
    }

    #[test]
    fn first_value_of_repeated_key_wins() {
        let query = parse_list_query(Some("topic=cats&topic=mitch")).unwrap();
        assert_eq!(query.topic.as_deref(), Some("cats"));
    }

    #[test]
    fn unknown_keys_are_reported_in_order() {
        match parse_list_query(Some("limit=5&topic=mitch&p=2&limit=9")) {
            Err(AppError::InvalidQueryParameter(names)) => {
                assert_eq!(names, vec!["limit".to_string(), "p".to_string()])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_key_is_named_visibly() {
        match parse_list_query(Some("=x&sort_by=votes")) {
            Err(err @ AppError::InvalidQueryParameter(_)) => {
                assert_eq!(err.to_string(), r#"Invalid query parameter: """#)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn topic_format() {
        assert!(is_valid_topic("mitch"));
        assert!(is_valid_topic("coding-101_v2"));
        assert!(!is_valid_topic("!%^"));
        assert!(!is_valid_topic("mitch; DROP TABLE topics"));
        assert!(!is_valid_topic(""));
        assert!(!is_valid_topic("café"));
    }

    #[test]
    fn inc_votes_validation() {
        assert_eq!(parse_inc_votes(&json!({ "inc_votes": -3 })).unwrap(), -3);
        assert_eq!(
            parse_inc_votes(&json!({})).unwrap_err().to_string(),
            "Missing 'inc_votes' key"
        );
        assert_eq!(
            parse_inc_votes(&json!({ "inc_votes": "lots" }))
                .unwrap_err()
                .to_string(),
            "Invalid value for 'inc_votes': expected a number"
        );
        assert!(parse_inc_votes(&json!({ "inc_votes": 1.5 })).is_err());
    }
}
