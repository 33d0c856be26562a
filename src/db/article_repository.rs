use async_trait::async_trait;

use crate::db::models::Article;
use crate::db::query::{ArticleFilter, ArticleQuery};
use crate::error::AppError;

/// Repository trait for article operations.
///
/// This trait allows mocking the database layer in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Number of stored articles, regardless of any filter.
    async fn count_all(&self) -> Result<u64, AppError>;

    /// One page of articles matching the query, in the query's sort order.
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError>;

    /// Number of articles matching the filter.
    async fn count(&self, filter: &ArticleFilter) -> Result<u64, AppError>;

    /// Find an article by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, AppError>;

    async fn insert(&self, article: &Article) -> Result<(), AppError>;

    async fn insert_many(&self, articles: &[Article]) -> Result<(), AppError>;

    /// Atomically add one like. Returns the new count, or `None` when no
    /// article has this id (nothing is written in that case).
    async fn increment_likes(&self, id: &str) -> Result<Option<i64>, AppError>;

    /// Atomically add one to `comment_count`. Returns whether an article matched.
    async fn increment_comment_count(&self, id: &str) -> Result<bool, AppError>;
}

/// MongoDB implementation of the ArticleRepository.
pub struct MongoArticleRepository {
    collection: mongodb::Collection<Article>,
}

impl MongoArticleRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("articles"),
        }
    }

    /// Create the unique index on `id`. Safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    async fn count_all(&self) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(query.sort.to_document())
            .skip(query.skip())
            .limit(i64::from(query.limit))
            .build();

        let cursor = self
            .collection
            .find(query.filter.to_document())
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn count(&self, filter: &ArticleFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(filter.to_document())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert(&self, article: &Article) -> Result<(), AppError> {
        self.collection
            .insert_one(article)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn insert_many(&self, articles: &[Article]) -> Result<(), AppError> {
        // MongoDB rejects an empty batch.
        if articles.is_empty() {
            return Ok(());
        }

        self.collection
            .insert_many(articles)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<i64>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "id": id }, doc! { "$inc": { "likes": 1 } })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(updated.map(|article| article.likes))
    }

    async fn increment_comment_count(&self, id: &str) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$inc": { "comment_count": 1 } })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.matched_count > 0)
    }
}
