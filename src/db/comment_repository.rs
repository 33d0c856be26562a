use async_trait::async_trait;

use crate::db::models::Comment;
use crate::error::AppError;

/// Repository trait for comment operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments of an article, oldest first.
    async fn list_for_article(&self, article_id: &str) -> Result<Vec<Comment>, AppError>;

    async fn insert(&self, comment: &Comment) -> Result<(), AppError>;

    async fn insert_many(&self, comments: &[Comment]) -> Result<(), AppError>;

    /// Atomically add one like. Returns the new count, or `None` when no
    /// comment has this id.
    async fn increment_likes(&self, id: &str) -> Result<Option<i64>, AppError>;
}

/// MongoDB implementation of the CommentRepository.
pub struct MongoCommentRepository {
    collection: mongodb::Collection<Comment>,
}

impl MongoCommentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("comments"),
        }
    }

    /// Unique index on `id`, plus a lookup index on `article_id`.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "article_id": 1, "published_at": 1 })
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn list_for_article(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "published_at": 1, "id": 1 })
            .build();

        let mut cursor = self
            .collection
            .find(doc! { "article_id": article_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut comments = Vec::new();
        while let Some(comment) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            comments.push(comment);
        }

        Ok(comments)
    }

    async fn insert(&self, comment: &Comment) -> Result<(), AppError> {
        self.collection
            .insert_one(comment)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn insert_many(&self, comments: &[Comment]) -> Result<(), AppError> {
        if comments.is_empty() {
            return Ok(());
        }

        self.collection
            .insert_many(comments)
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

        Ok(updated.map(|comment| comment.likes))
    }
}
