use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use crate::app::AppState;
use crate::db::article_repository::ArticleRepository;
use crate::db::models::{Article, ArticleCreate, ArticlesResponse, LikesResponse};
use crate::db::query::{ArticleQuery, ListArticlesParams};
use crate::error::AppError;

/// Core listing logic: one page of matching articles plus the total match count.
pub async fn process_list_articles(
    repo: &dyn ArticleRepository,
    query: ArticleQuery,
) -> Result<ArticlesResponse, AppError> {
    let articles = repo.list(&query).await?;
    let total = repo.count(&query.filter).await?;

    Ok(ArticlesResponse {
        articles,
        total,
        page: query.page,
        limit: query.limit,
    })
}

pub async fn process_get_article(
    repo: &dyn ArticleRepository,
    id: &str,
) -> Result<Article, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))
}

pub async fn process_like_article(
    repo: &dyn ArticleRepository,
    id: &str,
) -> Result<LikesResponse, AppError> {
    let likes = repo
        .increment_likes(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;

    tracing::debug!("Article '{}' now has {} likes", id, likes);
    Ok(LikesResponse { likes })
}

pub async fn process_create_article(
    repo: &dyn ArticleRepository,
    request: ArticleCreate,
) -> Result<Article, AppError> {
    let article = Article::from_create(request, Utc::now());
    repo.insert(&article).await?;

    tracing::info!("Created article '{}' ({})", article.title, article.id);
    Ok(article)
}

/// Axum handler for `GET /api/articles`.
pub async fn list_articles_handler(
    State(state): State<AppState>,
    params: Result<Query<ListArticlesParams>, QueryRejection>,
) -> Result<Json<ArticlesResponse>, AppError> {
    let Query(params) = params?;
    let query = ArticleQuery::from_params(params)?;

    let response = process_list_articles(state.article_repo.as_ref(), query).await?;
    Ok(Json(response))
}

/// Axum handler for `GET /api/articles/{id}`.
pub async fn get_article_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Article>, AppError> {
    let Path(id) = id?;
    let article = process_get_article(state.article_repo.as_ref(), &id).await?;
    Ok(Json(article))
}

/// Axum handler for `POST /api/articles/{id}/like`.
pub async fn like_article_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<LikesResponse>, AppError> {
    let Path(id) = id?;
    let response = process_like_article(state.article_repo.as_ref(), &id).await?;
    Ok(Json(response))
}

/// Axum handler for `POST /api/articles`.
pub async fn create_article_handler(
    State(state): State<AppState>,
    request: Result<Json<ArticleCreate>, JsonRejection>,
) -> Result<Json<Article>, AppError> {
    let Json(request) = request?;
    let article = process_create_article(state.article_repo.as_ref(), request).await?;
    Ok(Json(article))
}
