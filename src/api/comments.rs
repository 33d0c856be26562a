use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use crate::app::AppState;
use crate::db::article_repository::ArticleRepository;
use crate::db::comment_repository::CommentRepository;
use crate::db::models::{Comment, CommentCreate, LikesResponse};
use crate::error::AppError;

/// Comments of an article, oldest first. An unknown article simply has none.
pub async fn process_list_comments(
    repo: &dyn CommentRepository,
    article_id: &str,
) -> Result<Vec<Comment>, AppError> {
    repo.list_for_article(article_id).await
}

/// Add a comment and bump the parent's `comment_count`.
///
/// The insert and the increment are two independent writes. If the
/// increment fails the comment stays stored and the counter is left one
/// short; the failure is logged and returned to the caller.
pub async fn process_create_comment(
    articles: &dyn ArticleRepository,
    comments: &dyn CommentRepository,
    article_id: &str,
    request: CommentCreate,
) -> Result<Comment, AppError> {
    if articles.find_by_id(article_id).await?.is_none() {
        return Err(AppError::NotFound("Article not found".into()));
    }

    let comment = Comment::from_create(article_id, request, Utc::now());
    comments.insert(&comment).await?;

    match articles.increment_comment_count(article_id).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(
            "Article '{}' disappeared before its comment count could be updated",
            article_id
        ),
        Err(e) => {
            tracing::error!(
                "Comment '{}' stored but comment_count of article '{}' not updated: {}",
                comment.id,
                article_id,
                e
            );
            return Err(e);
        }
    }

    tracing::debug!("Added comment '{}' to article '{}'", comment.id, article_id);
    Ok(comment)
}

pub async fn process_like_comment(
    repo: &dyn CommentRepository,
    id: &str,
) -> Result<LikesResponse, AppError> {
    let likes = repo
        .increment_likes(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

    Ok(LikesResponse { likes })
}

/// Axum handler for `GET /api/articles/{id}/comments`.
pub async fn list_comments_handler(
    State(state): State<AppState>,
    article_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let Path(article_id) = article_id?;
    let comments = process_list_comments(state.comment_repo.as_ref(), &article_id).await?;
    Ok(Json(comments))
}

/// Axum handler for `POST /api/articles/{id}/comments`.
pub async fn create_comment_handler(
    State(state): State<AppState>,
    article_id: Result<Path<String>, PathRejection>,
    request: Result<Json<CommentCreate>, JsonRejection>,
) -> Result<Json<Comment>, AppError> {
    let Path(article_id) = article_id?;
    let Json(request) = request?;
    let comment = process_create_comment(
        state.article_repo.as_ref(),
        state.comment_repo.as_ref(),
        &article_id,
        request,
    )
    .await?;
    Ok(Json(comment))
}

/// Axum handler for `POST /api/comments/{id}/like`.
pub async fn like_comment_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<LikesResponse>, AppError> {
    let Path(id) = id?;
    let response = process_like_comment(state.comment_repo.as_ref(), &id).await?;
    Ok(Json(response))
}
