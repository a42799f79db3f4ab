//! Rating record endpoints.
//!
//! Read handlers live in `read`; create, update and delete in `write`.

mod read;
mod write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockrate_core::Rating;
use stockrate_db::RatingRow;

use super::ApiError;

pub(super) use read::{get_rating, list_ratings, list_ratings_page};
pub(super) use write::{create_rating, create_ratings_bulk, delete_rating, update_rating};

#[cfg(test)]
pub(super) use read::{page_numbers, page_window, PageQuery};

#[derive(Debug, Serialize)]
pub(in crate::api) struct RatingItem {
    pub id: i64,
    pub ticker: String,
    pub target_from: f64,
    pub target_to: f64,
    pub company: String,
    pub action: String,
    pub brokerage: String,
    pub rating_from: String,
    pub rating_to: String,
    pub time: DateTime<Utc>,
}

impl From<RatingRow> for RatingItem {
    fn from(row: RatingRow) -> Self {
        Self {
            id: row.id,
            ticker: row.ticker,
            target_from: row.target_from,
            target_to: row.target_to,
            company: row.company,
            action: row.action,
            brokerage: row.brokerage,
            rating_from: row.rating_from,
            rating_to: row.rating_to,
            time: row.time,
        }
    }
}

impl RatingItem {
    /// The stored view of a rating that was just persisted under `id`.
    fn from_rating(id: i64, rating: Rating) -> Self {
        Self {
            id,
            ticker: rating.ticker,
            target_from: rating.target_from,
            target_to: rating.target_to,
            company: rating.company,
            action: rating.action,
            brokerage: rating.brokerage,
            rating_from: rating.rating_from,
            rating_to: rating.rating_to,
            time: rating.time.with_timezone(&Utc),
        }
    }
}

fn rating_not_found(req_id: &str, id: i64) -> ApiError {
    ApiError::new(req_id, "not_found", format!("rating {id} not found"))
}
