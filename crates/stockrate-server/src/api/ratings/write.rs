use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use stockrate_core::{build_rating, build_ratings, RatingInput, RawItem};
use stockrate_db::DbError;

use crate::middleware::RequestId;

use super::super::{
    map_db_error, map_ingest_error, map_rejection, ApiError, ApiResponse, AppState,
};
use super::{rating_not_found, RatingItem};

#[derive(Debug, Serialize)]
pub(in crate::api) struct BulkCreateResponse {
    pub inserted: usize,
    pub ids: Vec<i64>,
}

fn map_write_error(req_id: &str, id: i64, e: &DbError) -> ApiError {
    match e {
        DbError::NotFound => rating_not_found(req_id, id),
        other => map_db_error(req_id.to_owned(), other),
    }
}

/// POST /api/v1/ratings: validate and store a single rating.
pub(in crate::api) async fn create_rating(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RatingInput>,
) -> Result<(StatusCode, Json<ApiResponse<RatingItem>>), ApiError> {
    let rid = &req_id.0;
    let rating = build_rating(&body).map_err(|e| map_ingest_error(rid.clone(), &e))?;

    let id = stockrate_db::insert_rating(&state.pool, &rating)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    tracing::info!(id, ticker = %rating.ticker, "rating created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RatingItem::from_rating(id, rating), req_id.0)),
    ))
}

/// POST /api/v1/ratings/bulk: validate every item, then store all or none.
pub(in crate::api) async fn create_ratings_bulk(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(items): Json<Vec<RawItem>>,
) -> Result<(StatusCode, Json<ApiResponse<BulkCreateResponse>>), ApiError> {
    let rid = &req_id.0;
    let ratings = build_ratings(&items).map_err(|e| map_ingest_error(rid.clone(), &e))?;

    let ids = stockrate_db::insert_ratings(&state.pool, &ratings)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    tracing::info!(inserted = ids.len(), "rating batch created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            BulkCreateResponse {
                inserted: ids.len(),
                ids,
            },
            req_id.0,
        )),
    ))
}

/// PUT /api/v1/ratings/{id}: replace a rating with newly validated input.
pub(in crate::api) async fn update_rating(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
    Json(body): Json<RatingInput>,
) -> Result<Json<ApiResponse<RatingItem>>, ApiError> {
    let rid = &req_id.0;
    let Path(id) = id.map_err(|e| map_rejection(rid.clone(), "rating id", &e))?;
    let rating = build_rating(&body).map_err(|e| map_ingest_error(rid.clone(), &e))?;

    stockrate_db::update_rating(&state.pool, id, &rating)
        .await
        .map_err(|e| map_write_error(rid, id, &e))?;

    Ok(Json(ApiResponse::new(
        RatingItem::from_rating(id, rating),
        req_id.0,
    )))
}

/// DELETE /api/v1/ratings/{id}
pub(in crate::api) async fn delete_rating(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;
    let Path(id) = id.map_err(|e| map_rejection(rid.clone(), "rating id", &e))?;

    stockrate_db::delete_rating(&state.pool, id)
        .await
        .map_err(|e| map_write_error(rid, id, &e))?;

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "deleted": true }),
        req_id.0,
    )))
}
