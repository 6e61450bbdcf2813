pub mod watchlist_operations;

pub use watchlist_operations::*;

use anyhow::Result;
use sqlx::PgPool;

/// 建表（幂等）
pub async fn create_tables(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS watchlist_entries (
            id UUID PRIMARY KEY,
            address TEXT NOT NULL UNIQUE,
            label TEXT,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
