use std::path::Path;

use anyhow::Context;
use stockrate_core::{build_ratings, Rating, RawItem};

/// Validate every item in `contents` and return the built ratings.
///
/// The whole file is rejected on the first bad item, same as the bulk
/// endpoint.
pub(super) fn parse_ratings(contents: &str) -> anyhow::Result<Vec<Rating>> {
    let items: Vec<RawItem> =
        serde_json::from_str(contents).context("expected a JSON array of rating objects")?;
    let ratings = build_ratings(&items)?;
    Ok(ratings)
}

/// Import ratings from a JSON file.
///
/// When `dry_run` is `true` the file is validated and summarized but the
/// database is never contacted.
///
/// # Errors
///
/// Returns an error if the file cannot be read, any item fails validation,
/// or the batch insert fails.
pub(crate) async fn run_ratings_import(path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ratings = parse_ratings(&contents)
        .with_context(|| format!("invalid rating file {}", path.display()))?;

    if dry_run {
        println!(
            "dry-run: {} rating(s) in {} are valid; nothing written",
            ratings.len(),
            path.display()
        );
        return Ok(());
    }

    let pool = crate::connect().await?;
    let ids = stockrate_db::insert_ratings(&pool, &ratings).await?;
    tracing::info!(inserted = ids.len(), file = %path.display(), "ratings imported");
    println!("imported {} rating(s)", ids.len());

    Ok(())
}
