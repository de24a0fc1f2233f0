//! Utility to inspect the registry store and print table structures.

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

/// Main entry point for the schema inspection utility.
///
/// Connects to the store and lists columns and row counts for every table.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data.db".to_string());
    let pool = SqlitePoolOptions::new().connect(&database_url).await?;

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name NOT LIKE '_sqlx_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    println!("Found tables:");
    for (table,) in &tables {
        // Table names come from sqlite_master, not user input
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .fetch_one(&pool)
            .await?;
        println!("- {} ({} rows)", table, count);

        let columns: Vec<(String, String)> =
            sqlx::query_as("SELECT name, type FROM pragma_table_info(?) ORDER BY cid")
                .bind(table)
                .fetch_all(&pool)
                .await?;

        for (col, type_) in columns {
            println!("  - {}: {}", col, type_);
        }
        println!();
    }

    Ok(())
}
