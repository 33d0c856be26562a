use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::timestamp;

/// A blog article stored in the `articles` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Opaque unique identifier (UUID v4 for articles created via the API).
    pub id: String,
    pub title: String,
    /// Short summary shown in listings.
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub author: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub published_at: DateTime<Utc>,
    /// Free-form category label used for exact-match filtering.
    pub category: String,
    pub tags: Vec<String>,
    /// Display string such as `5 min`.
    pub read_time: String,
    #[serde(default)]
    pub likes: i64,
    /// Number of comments referencing this article, maintained incrementally.
    #[serde(default)]
    pub comment_count: i64,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Build a fresh article from a creation payload.
    pub fn from_create(request: ArticleCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title,
            excerpt: request.excerpt,
            content: request.content,
            author: request.author,
            published_at: now,
            category: request.category,
            tags: request.tags,
            read_time: request.read_time,
            likes: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A reader comment stored in the `comments` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// The article this comment belongs to.
    pub article_id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(serialize_with = "timestamp::serialize")]
    pub published_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_create(article_id: &str, request: CommentCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            article_id: article_id.to_string(),
            author: request.author,
            content: request.content,
            likes: 0,
            published_at: now,
        }
    }
}

/// The singleton "about the section" document (`ciel_info` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mission: String,
    pub specializations: Vec<Specialization>,
    /// Named counters (students, graduates, ...).
    pub stats: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub title: String,
    pub description: String,
}

/// An academic program description (`formations` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    /// Program level, e.g. `BAC_PRO`, `BTS`, `MASTER`. Stored upper-case.
    pub level: String,
    pub title: String,
    pub duration: String,
    pub description: String,
    pub objectives: Vec<String>,
    pub skills: Vec<String>,
    pub career_paths: Vec<String>,
    pub admission_requirements: Vec<String>,
    pub program_highlights: Vec<String>,
}

/// The request payload for creating an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCreate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: String,
}

/// The request payload for adding a comment to an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub author: String,
    pub content: String,
}

/// One page of the article listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
    /// Number of articles matching the filter, ignoring pagination.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// The response of the like endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: i64,
}
