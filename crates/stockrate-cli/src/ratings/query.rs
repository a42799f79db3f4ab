/// Show up to `limit` stored ratings, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_ratings_list(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let rows = stockrate_db::list_ratings_page(pool, limit.max(1), 0).await?;

    if rows.is_empty() {
        println!("no ratings found; run `ratings import` first");
        return Ok(());
    }

    println!(
        "{:<8}{:<8}{:>10}{:>10}  {:<12}{:<22}COMPANY",
        "ID", "TICKER", "FROM", "TO", "RATING", "TIME"
    );
    for row in &rows {
        println!(
            "{:<8}{:<8}{:>10.2}{:>10.2}  {:<12}{:<22}{}",
            row.id,
            row.ticker,
            row.target_from,
            row.target_to,
            truncate(&row.rating_to, 11),
            row.time.format("%Y-%m-%d %H:%M:%S"),
            truncate(&row.company, 40)
        );
    }

    Ok(())
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars).collect::<String>())
    } else {
        value.to_string()
    }
}
