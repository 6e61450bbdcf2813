use crate::types::{CreateWatchlistEntry, WatchlistEntry};
use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct WatchlistOperations;

impl WatchlistOperations {
    /// 添加监控地址
    ///
    /// 地址统一小写存储，重复地址由唯一约束拒绝
    pub async fn add_entry(
        pool: &PgPool,
        entry: &CreateWatchlistEntry,
    ) -> Result<WatchlistEntry> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let address = entry.address.to_lowercase();

        sqlx::query(
            r#"
            INSERT INTO watchlist_entries (id, address, label, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&address)
        .bind(&entry.label)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(WatchlistEntry {
            id,
            address,
            label: entry.label.clone(),
            created_at: now,
        })
    }

    /// 获取全部监控地址（按添加时间排序）
    pub async fn get_all_entries(pool: &PgPool) -> Result<Vec<WatchlistEntry>> {
        let entries = sqlx::query_as::<_, WatchlistEntry>(
            r#"
            SELECT id, address, label, created_at
            FROM watchlist_entries
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// 更新地址备注
    pub async fn update_label(
        pool: &PgPool,
        address: &str,
        label: Option<&str>,
    ) -> Result<Option<WatchlistEntry>> {
        let entry = sqlx::query_as::<_, WatchlistEntry>(
            r#"
            UPDATE watchlist_entries
            SET label = $2
            WHERE address = $1
            RETURNING id, address, label, created_at
            "#,
        )
        .bind(address.to_lowercase())
        .bind(label)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// 移除监控地址，返回是否存在
    pub async fn remove_entry(pool: &PgPool, address: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM watchlist_entries
            WHERE address = $1
            "#,
        )
        .bind(address.to_lowercase())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
