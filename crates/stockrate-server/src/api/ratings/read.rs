use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::super::{map_db_error, map_rejection, ApiError, ApiResponse, AppState};
use super::{rating_not_found, RatingItem};

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct RatingsPage {
    pub items: Vec<RatingItem>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Validated `(limit, offset)` for a page request.
///
/// A missing limit defaults to 10 and large limits are clamped to 200;
/// non-positive limits and negative offsets are rejected.
pub(in crate::api) fn page_window(req_id: &str, query: &PageQuery) -> Result<(i64, i64), ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit <= 0 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("limit must be a positive integer, got {limit}"),
        ));
    }

    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("offset must be zero or greater, got {offset}"),
        ));
    }

    Ok((limit.min(MAX_PAGE_LIMIT), offset))
}

/// 1-based page number and total page count for a window.
pub(in crate::api) fn page_numbers(total_count: i64, limit: i64, offset: i64) -> (i64, i64) {
    let page = offset / limit + 1;
    let total_pages = (total_count + limit - 1) / limit;
    (page, total_pages)
}

/// GET /api/v1/ratings: every rating, ordered by id.
pub(in crate::api) async fn list_ratings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<RatingItem>>>, ApiError> {
    let rows = stockrate_db::list_ratings(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(RatingItem::from).collect();
    Ok(Json(ApiResponse::new(data, req_id.0)))
}

/// GET /api/v1/ratings/page?limit=&offset=: one page plus totals.
pub(in crate::api) async fn list_ratings_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<RatingsPage>>, ApiError> {
    let rid = &req_id.0;
    let Query(query) = query.map_err(|e| map_rejection(rid.clone(), "limit or offset", &e))?;
    let (limit, offset) = page_window(rid, &query)?;

    let rows = stockrate_db::list_ratings_page(&state.pool, limit, offset)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    let total_count = stockrate_db::count_ratings(&state.pool)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let (page, total_pages) = page_numbers(total_count, limit, offset);

    Ok(Json(ApiResponse::new(
        RatingsPage {
            items: rows.into_iter().map(RatingItem::from).collect(),
            total_count,
            limit,
            offset,
            page,
            total_pages,
        },
        req_id.0,
    )))
}

/// GET /api/v1/ratings/{id}
pub(in crate::api) async fn get_rating(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<RatingItem>>, ApiError> {
    let rid = &req_id.0;
    let Path(id) = id.map_err(|e| map_rejection(rid.clone(), "rating id", &e))?;
    let row = stockrate_db::get_rating(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| rating_not_found(rid, id))?;

    Ok(Json(ApiResponse::new(RatingItem::from(row), req_id.0)))
}
