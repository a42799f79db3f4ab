//! Database operations for the `stock_ratings` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use stockrate_core::Rating;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `stock_ratings` table.
///
/// `time` is stored as `TIMESTAMPTZ`, so any source offset is normalized to
/// UTC on the way back out.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RatingRow {
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

const SELECT_COLUMNS: &str = "SELECT id, ticker, target_from, target_to, company, action, \
                                     brokerage, rating_from, rating_to, time \
                              FROM stock_ratings";

const INSERT_RATING: &str = "INSERT INTO stock_ratings \
         (ticker, target_from, target_to, company, action, brokerage, rating_from, rating_to, time) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING id";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every rating, ordered by `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ratings(pool: &PgPool) -> Result<Vec<RatingRow>, DbError> {
    let rows = sqlx::query_as::<_, RatingRow>(&format!("{SELECT_COLUMNS} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns one page of ratings, ordered by `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ratings_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<RatingRow>, DbError> {
    let rows = sqlx::query_as::<_, RatingRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY id LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the total number of stored ratings.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_ratings(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_ratings")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Returns a single rating by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_rating(pool: &PgPool, id: i64) -> Result<Option<RatingRow>, DbError> {
    let row = sqlx::query_as::<_, RatingRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Inserts one rating and returns its generated `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_rating(pool: &PgPool, rating: &Rating) -> Result<i64, DbError> {
    let id = bind_rating(sqlx::query_scalar::<_, i64>(INSERT_RATING), rating)
        .fetch_one(pool)
        .await?;

    Ok(id)
}

/// Inserts a batch of ratings and returns their ids in input order.
///
/// All inserts run inside a single transaction; if any insert fails the
/// whole batch is rolled back. An empty batch touches nothing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails.
pub async fn insert_ratings(pool: &PgPool, ratings: &[Rating]) -> Result<Vec<i64>, DbError> {
    if ratings.is_empty() {
        return Ok(Vec::new());
    }

    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(ratings.len());

    for rating in ratings {
        let id = bind_rating(sqlx::query_scalar::<_, i64>(INSERT_RATING), rating)
            .fetch_one(&mut *tx)
            .await?;
        ids.push(id);
    }

    tx.commit().await?;
    Ok(ids)
}

/// Replaces every column of an existing rating.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no rating has this id, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_rating(pool: &PgPool, id: i64, rating: &Rating) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE stock_ratings \
         SET ticker = $1, target_from = $2, target_to = $3, company = $4, action = $5, \
             brokerage = $6, rating_from = $7, rating_to = $8, time = $9 \
         WHERE id = $10",
    )
    .bind(&rating.ticker)
    .bind(rating.target_from)
    .bind(rating.target_to)
    .bind(&rating.company)
    .bind(&rating.action)
    .bind(&rating.brokerage)
    .bind(&rating.rating_from)
    .bind(&rating.rating_to)
    .bind(rating.time)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Deletes a rating by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no rating has this id, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_rating(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM stock_ratings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

fn bind_rating<'q>(
    query: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    rating: &'q Rating,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    query
        .bind(&rating.ticker)
        .bind(rating.target_from)
        .bind(rating.target_to)
        .bind(&rating.company)
        .bind(&rating.action)
        .bind(&rating.brokerage)
        .bind(&rating.rating_from)
        .bind(&rating.rating_to)
        .bind(rating.time)
}
