//! In-memory repositories used by unit tests.
//!
//! They mirror the MongoDB semantics the handlers rely on: exact category
//! match, case-insensitive substring search, descending sorts with an `id`
//! tie-break, skip/limit pagination and insertion-ordered formations.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::AppState;
use crate::db::article_repository::ArticleRepository;
use crate::db::catalog_repository::CatalogRepository;
use crate::db::comment_repository::CommentRepository;
use crate::db::models::{Article, Comment, Formation, SectionInfo};
use crate::db::query::{ArticleFilter, ArticleQuery, SortOrder};
use crate::error::AppError;

fn matches(filter: &ArticleFilter, article: &Article) -> bool {
    if let Some(category) = &filter.category {
        if &article.category != category {
            return false;
        }
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let found = [&article.title, &article.excerpt, &article.content]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !found {
            return false;
        }
    }

    true
}

fn compare(sort: SortOrder, a: &Article, b: &Article) -> Ordering {
    let primary = match sort {
        SortOrder::Recent => b.published_at.cmp(&a.published_at),
        SortOrder::Popular => b.likes.cmp(&a.likes),
        SortOrder::Comments => b.comment_count.cmp(&a.comment_count),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[derive(Default)]
pub struct MemoryArticleRepo {
    pub articles: Mutex<Vec<Article>>,
}

impl MemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Article> {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepo {
    async fn count_all(&self) -> Result<u64, AppError> {
        Ok(self.articles.lock().unwrap().len() as u64)
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError> {
        let mut found: Vec<Article> = self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches(&query.filter, a))
            .cloned()
            .collect();
        found.sort_by(|a, b| compare(query.sort, a, b));

        Ok(found
            .into_iter()
            .skip(query.skip() as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ArticleFilter) -> Result<u64, AppError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches(filter, a))
            .count() as u64)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, AppError> {
        Ok(self.get(id))
    }

    async fn insert(&self, article: &Article) -> Result<(), AppError> {
        self.articles.lock().unwrap().push(article.clone());
        Ok(())
    }

    async fn insert_many(&self, articles: &[Article]) -> Result<(), AppError> {
        self.articles.lock().unwrap().extend_from_slice(articles);
        Ok(())
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<i64>, AppError> {
        let mut articles = self.articles.lock().unwrap();
        Ok(articles.iter_mut().find(|a| a.id == id).map(|a| {
            a.likes += 1;
            a.likes
        }))
    }

    async fn increment_comment_count(&self, id: &str) -> Result<bool, AppError> {
        let mut articles = self.articles.lock().unwrap();
        match articles.iter_mut().find(|a| a.id == id) {
            Some(article) => {
                article.comment_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryCommentRepo {
    pub comments: Mutex<Vec<Comment>>,
}

impl MemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepo {
    async fn list_for_article(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        let mut found: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(found)
    }

    async fn insert(&self, comment: &Comment) -> Result<(), AppError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn insert_many(&self, comments: &[Comment]) -> Result<(), AppError> {
        self.comments.lock().unwrap().extend_from_slice(comments);
        Ok(())
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<i64>, AppError> {
        let mut comments = self.comments.lock().unwrap();
        Ok(comments.iter_mut().find(|c| c.id == id).map(|c| {
            c.likes += 1;
            c.likes
        }))
    }
}

#[derive(Default)]
pub struct MemoryCatalogRepo {
    pub section_info: Mutex<Vec<SectionInfo>>,
    pub formations: Mutex<Vec<Formation>>,
}

impl MemoryCatalogRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepo {
    async fn section_info(&self) -> Result<Option<SectionInfo>, AppError> {
        Ok(self.section_info.lock().unwrap().first().cloned())
    }

    async fn list_formations(&self) -> Result<Vec<Formation>, AppError> {
        Ok(self.formations.lock().unwrap().clone())
    }

    async fn find_formation(&self, level: &str) -> Result<Option<Formation>, AppError> {
        Ok(self
            .formations
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.level == level)
            .cloned())
    }

    async fn insert_section_info(&self, info: &SectionInfo) -> Result<(), AppError> {
        self.section_info.lock().unwrap().push(info.clone());
        Ok(())
    }

    async fn insert_formations(&self, formations: &[Formation]) -> Result<(), AppError> {
        self.formations.lock().unwrap().extend_from_slice(formations);
        Ok(())
    }
}

/// Repositories plus an `AppState` sharing them, for handler-level tests.
pub struct MemoryStore {
    pub articles: Arc<MemoryArticleRepo>,
    pub comments: Arc<MemoryCommentRepo>,
    pub catalog: Arc<MemoryCatalogRepo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(MemoryArticleRepo::new()),
            comments: Arc::new(MemoryCommentRepo::new()),
            catalog: Arc::new(MemoryCatalogRepo::new()),
        }
    }

    /// A store populated by the demo seeder.
    pub async fn seeded() -> Self {
        let store = Self::new();
        crate::demo_seeder::seed_demo_data(
            store.articles.as_ref(),
            store.comments.as_ref(),
            store.catalog.as_ref(),
        )
        .await
        .expect("demo seed should succeed on an empty store");
        store
    }

    pub fn state(&self) -> AppState {
        AppState {
            article_repo: self.articles.clone(),
            comment_repo: self.comments.clone(),
            catalog_repo: self.catalog.clone(),
        }
    }
}
