use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::db::catalog_repository::CatalogRepository;
use crate::db::models::{Formation, SectionInfo};
use crate::error::AppError;

pub async fn process_get_section_info(
    repo: &dyn CatalogRepository,
) -> Result<SectionInfo, AppError> {
    repo.section_info()
        .await?
        .ok_or_else(|| AppError::NotFound("CIEL info not found".into()))
}

pub async fn process_list_formations(
    repo: &dyn CatalogRepository,
) -> Result<Vec<Formation>, AppError> {
    repo.list_formations().await
}

/// Look up a formation by level. Levels are stored upper-case, so the
/// lookup is case-insensitive for callers.
pub async fn process_get_formation(
    repo: &dyn CatalogRepository,
    level: &str,
) -> Result<Formation, AppError> {
    repo.find_formation(&level.to_uppercase())
        .await?
        .ok_or_else(|| AppError::NotFound("Formation not found".into()))
}

/// Axum handler for `GET /api/ciel-info`.
pub async fn section_info_handler(
    State(state): State<AppState>,
) -> Result<Json<SectionInfo>, AppError> {
    let info = process_get_section_info(state.catalog_repo.as_ref()).await?;
    Ok(Json(info))
}

/// Axum handler for `GET /api/formations`.
pub async fn list_formations_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Formation>>, AppError> {
    let formations = process_list_formations(state.catalog_repo.as_ref()).await?;
    Ok(Json(formations))
}

/// Axum handler for `GET /api/formations/{level}`.
pub async fn get_formation_handler(
    State(state): State<AppState>,
    level: Result<Path<String>, PathRejection>,
) -> Result<Json<Formation>, AppError> {
    let Path(level) = level?;
    let formation = process_get_formation(state.catalog_repo.as_ref(), &level).await?;
    Ok(Json(formation))
}
