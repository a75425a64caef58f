use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use catalog::{
    Catalog,
    item::ItemImageDocument,
    response::{ChapterResponse, SubjectResponse, chapter_responses, subject_responses},
    tree::LargeNode,
};
use tracing::debug;

use crate::{
    api::ApiResponse,
    error::AppError,
    search::{SimilarItemsRequest, SimilarityQuery},
    state::AppState,
};

fn ensure_subject(catalog: &Catalog, subject_id: i64) -> Result<(), AppError> {
    let known = catalog.subjects().iter().any(|s| s.subject_id == subject_id)
        || catalog
            .chapters()
            .iter()
            .any(|row| row.subject_id == Some(subject_id));

    if !known {
        return Err(AppError::NotFound(format!("subject {subject_id}")));
    }

    Ok(())
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn subjects_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<SubjectResponse>>> {
    Json(ApiResponse::success(subject_responses(state.catalog.subjects())))
}

pub async fn chapters_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ChapterResponse>>> {
    Json(ApiResponse::success(chapter_responses(state.catalog.chapters())))
}

pub async fn subject_chapters_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ChapterResponse>>>, AppError> {
    ensure_subject(&state.catalog, subject_id)?;

    let rows = state.catalog.chapters_for_subject(subject_id);

    Ok(Json(ApiResponse::success(chapter_responses(&rows))))
}

pub async fn chapter_tree_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<LargeNode>>>, AppError> {
    ensure_subject(&state.catalog, subject_id)?;

    let tree = state.catalog.chapter_tree(subject_id);
    debug!(subject_id, large_chapters = tree.len(), "Built chapter tree");

    Ok(Json(ApiResponse::success(tree)))
}

pub async fn similar_items_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimilarItemsRequest>, JsonRejection>,
) -> Result<Json<Vec<ItemImageDocument>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let query = SimilarityQuery::from_request(request)?;

    let items = state.search.find_similar(&query).await?;

    Ok(Json(items))
}
