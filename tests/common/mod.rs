use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use ciel_blog::app::MongoStore;
use ciel_blog::config::Settings;
use ciel_blog::db::article_repository::{ArticleRepository, MongoArticleRepository};
use ciel_blog::db::comment_repository::{CommentRepository, MongoCommentRepository};

/// Holds a running MongoDB container and the Axum router wired to it.
///
/// The container is kept alive for as long as this struct lives. When
/// dropped, it is stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub store: MongoStore,
    pub router: Router,
    pub articles: Arc<MongoArticleRepository>,
    pub comments: Arc<MongoCommentRepository>,
}

impl TestEnv {
    /// Start MongoDB, create indexes and seed the demo data.
    pub async fn start() -> Self {
        let env = Self::start_empty().await;
        env.store.seed().await.expect("Failed to seed demo data");
        env
    }

    /// Start MongoDB and create indexes, without seeding.
    pub async fn start_empty() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let settings = Settings::from_map(
            [
                ("MONGO_URL", format!("mongodb://127.0.0.1:{}", mongo_port)),
                ("DB_NAME", "ciel_test".to_string()),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        )
        .expect("Failed to build settings");

        let store = MongoStore::connect(&settings)
            .await
            .expect("Failed to connect to MongoDB");
        store
            .ensure_indexes()
            .await
            .expect("Failed to create indexes");

        let router = ciel_blog::app::router(store.state());

        Self {
            _mongo: mongo_container,
            articles: store.articles.clone(),
            comments: store.comments.clone(),
            store,
            router,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Helper: create an article via the API.
    pub async fn create_article(
        &self,
        server: &axum_test::TestServer,
        title: &str,
        category: &str,
        content: &str,
    ) -> axum_test::TestResponse {
        server
            .post("/api/articles")
            .json(&serde_json::json!({
                "title": title,
                "excerpt": format!("Résumé de {title}"),
                "content": content,
                "author": "Test Author",
                "category": category,
                "tags": ["test"],
                "read_time": "3 min"
            }))
            .await
    }

    pub async fn article_count(&self) -> u64 {
        self.articles.count_all().await.unwrap()
    }

    pub async fn comments_of(&self, article_id: &str) -> usize {
        self.comments
            .list_for_article(article_id)
            .await
            .unwrap()
            .len()
    }
}
