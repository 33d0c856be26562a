use async_trait::async_trait;

use crate::db::models::{Formation, SectionInfo};
use crate::error::AppError;

/// Repository trait for the read-only section content: the section
/// description singleton and the formations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// The section description, if it has been stored.
    async fn section_info(&self) -> Result<Option<SectionInfo>, AppError>;

    /// All formations, in insertion order.
    async fn list_formations(&self) -> Result<Vec<Formation>, AppError>;

    /// Find a formation by its exact level label.
    async fn find_formation(&self, level: &str) -> Result<Option<Formation>, AppError>;

    async fn insert_section_info(&self, info: &SectionInfo) -> Result<(), AppError>;

    async fn insert_formations(&self, formations: &[Formation]) -> Result<(), AppError>;
}

/// MongoDB implementation of the CatalogRepository.
pub struct MongoCatalogRepository {
    section_info: mongodb::Collection<SectionInfo>,
    formations: mongodb::Collection<Formation>,
}

impl MongoCatalogRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            section_info: db.collection("ciel_info"),
            formations: db.collection("formations"),
        }
    }

    /// Formation levels are unique.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "level": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.formations
            .create_index(index)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn section_info(&self) -> Result<Option<SectionInfo>, AppError> {
        use mongodb::bson::doc;

        self.section_info
            .find_one(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_formations(&self) -> Result<Vec<Formation>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        // `_id` is a generated ObjectId, so it follows insertion order.
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let cursor = self
            .formations
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_formation(&self, level: &str) -> Result<Option<Formation>, AppError> {
        use mongodb::bson::doc;

        self.formations
            .find_one(doc! { "level": level })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_section_info(&self, info: &SectionInfo) -> Result<(), AppError> {
        self.section_info
            .insert_one(info)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn insert_formations(&self, formations: &[Formation]) -> Result<(), AppError> {
        if formations.is_empty() {
            return Ok(());
        }

        self.formations
            .insert_many(formations)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
