use axum::Json;
use serde_json::{json, Value};

/// `GET /api`: a description of every endpoint the service serves.
pub async fn list_endpoints() -> Json<Value> {
    Json(json!({ "endpoints": endpoints() }))
}

fn endpoints() -> Value {
    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!", "img_url": "" }]
            }
        },
        "GET /api/users": {
            "description": "serves an array of all users",
            "queries": [],
            "exampleResponse": {
                "users": [{ "username": "butter_bridge", "name": "jonny", "avatar_url": "" }]
            }
        },
        "GET /api/articles": {
            "description": "serves an array of all articles, without bodies, each with a comment_count",
            "queries": ["sort_by", "order", "topic"],
            "exampleResponse": {
                "articles": [{
                    "article_id": 34,
                    "author": "grumpy19",
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "",
                    "comment_count": 6
                }]
            }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article, including its body and comment_count",
            "queries": []
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to an article's votes and serves the updated article",
            "exampleRequest": { "inc_votes": 1 }
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves an article's comments, newest first",
            "queries": []
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to an article and serves the created comment",
            "exampleRequest": { "username": "butter_bridge", "body": "Great read" }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment; responds 204 with no body"
        }
    })
}
