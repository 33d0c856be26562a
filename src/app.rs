use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Settings;
use crate::db::article_repository::{ArticleRepository, MongoArticleRepository};
use crate::db::catalog_repository::{CatalogRepository, MongoCatalogRepository};
use crate::db::comment_repository::{CommentRepository, MongoCommentRepository};
use crate::error::AppError;

/// Shared handler state: one handle per repository, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub article_repo: Arc<dyn ArticleRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
}

/// The MongoDB-backed store: the client connection plus its repositories.
///
/// Created once at startup and shut down explicitly when the server stops.
pub struct MongoStore {
    client: mongodb::Client,
    pub articles: Arc<MongoArticleRepository>,
    pub comments: Arc<MongoCommentRepository>,
    pub catalog: Arc<MongoCatalogRepository>,
}

impl MongoStore {
    /// Connect to MongoDB and verify the server is reachable.
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        use mongodb::bson::doc;

        let client = mongodb::Client::with_uri_str(&settings.mongo_url).await?;
        let db = client.database(&settings.db_name);

        // The driver connects lazily; ping so that an unreachable server is
        // reported at startup rather than on the first request.
        db.run_command(doc! { "ping": 1 }).await?;

        Ok(Self::from_database(client, &db))
    }

    pub fn from_database(client: mongodb::Client, db: &mongodb::Database) -> Self {
        Self {
            client,
            articles: Arc::new(MongoArticleRepository::new(db)),
            comments: Arc::new(MongoCommentRepository::new(db)),
            catalog: Arc::new(MongoCatalogRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        self.articles.ensure_indexes().await?;
        self.comments.ensure_indexes().await?;
        self.catalog.ensure_indexes().await?;
        Ok(())
    }

    pub async fn seed(&self) -> Result<crate::demo_seeder::SeedOutcome, AppError> {
        crate::demo_seeder::seed_demo_data(
            self.articles.as_ref(),
            self.comments.as_ref(),
            self.catalog.as_ref(),
        )
        .await
    }

    pub fn state(&self) -> AppState {
        AppState {
            article_repo: self.articles.clone(),
            comment_repo: self.comments.clone(),
            catalog_repo: self.catalog.clone(),
        }
    }

    /// Close the connection pool.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// Build the `/api` router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/articles",
            get(api::articles::list_articles_handler).post(api::articles::create_article_handler),
        )
        .route("/articles/{id}", get(api::articles::get_article_handler))
        .route("/articles/{id}/like", post(api::articles::like_article_handler))
        .route(
            "/articles/{id}/comments",
            get(api::comments::list_comments_handler).post(api::comments::create_comment_handler),
        )
        .route("/comments/{id}/like", post(api::comments::like_comment_handler))
        .route("/ciel-info", get(api::catalog::section_info_handler))
        .route("/formations", get(api::catalog::list_formations_handler))
        .route("/formations/{level}", get(api::catalog::get_formation_handler))
        .route("/health", get(api::health::health_handler));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
