use std::str::FromStr;

use bson::{doc, Document};
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Fields searched by the free-text `search` parameter.
pub const SEARCH_FIELDS: &[&str] = &["title", "excerpt", "content"];

/// Ordering of the article listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest `published_at` first.
    #[default]
    Recent,
    /// Most liked first.
    Popular,
    /// Most commented first.
    Comments,
}

impl SortOrder {
    /// The article field this order sorts on, always descending.
    pub fn field(&self) -> &'static str {
        match self {
            SortOrder::Recent => "published_at",
            SortOrder::Popular => "likes",
            SortOrder::Comments => "comment_count",
        }
    }

    /// MongoDB sort specification. Ties are broken on `id` so that
    /// consecutive pages never overlap.
    pub fn to_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.field(), -1);
        sort.insert("id", 1);
        sort
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortOrder::Recent),
            "popular" => Ok(SortOrder::Popular),
            "comments" => Ok(SortOrder::Comments),
            other => Err(AppError::BadRequest(format!(
                "Invalid sort '{}'. Expected: recent, popular, comments",
                other
            ))),
        }
    }
}

/// Raw query string of `GET /api/articles`, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListArticlesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Which articles match a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact category label.
    pub category: Option<String>,
    /// Case-insensitive substring of title, excerpt or content.
    pub search: Option<String>,
}

impl ArticleFilter {
    /// MongoDB filter document. The search text is matched literally.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }

        if let Some(search) = &self.search {
            let pattern = regex::escape(search);
            let clauses: Vec<Document> = SEARCH_FIELDS
                .iter()
                .map(|field| {
                    let mut clause = Document::new();
                    clause.insert(*field, doc! { "$regex": &pattern, "$options": "i" });
                    clause
                })
                .collect();
            filter.insert("$or", clauses);
        }

        filter
    }
}

/// A validated article listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub filter: ArticleFilter,
    pub sort: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            filter: ArticleFilter::default(),
            sort: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ArticleQuery {
    /// Validate raw parameters. Out-of-range values are rejected, never clamped.
    pub fn from_params(params: ListArticlesParams) -> Result<Self, AppError> {
        let page = match params.page {
            None => DEFAULT_PAGE,
            Some(page) if page >= 1 && page <= i64::from(u32::MAX) => page as u32,
            Some(page) => {
                return Err(AppError::BadRequest(format!(
                    "Invalid page {}. Expected an integer >= 1",
                    page
                )))
            }
        };

        let limit = match params.limit {
            None => DEFAULT_LIMIT,
            Some(limit) if limit >= 1 && limit <= i64::from(MAX_LIMIT) => limit as u32,
            Some(limit) => {
                return Err(AppError::BadRequest(format!(
                    "Invalid limit {}. Expected an integer between 1 and {}",
                    limit, MAX_LIMIT
                )))
            }
        };

        let sort = match params.sort.as_deref() {
            None => SortOrder::default(),
            Some(s) => s.parse()?,
        };

        Ok(Self {
            filter: ArticleFilter {
                category: params.category.filter(|c| !c.is_empty()),
                search: params.search.filter(|s| !s.is_empty()),
            },
            sort,
            page,
            limit,
        })
    }

    /// Number of matching articles to skip before the requested page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}
