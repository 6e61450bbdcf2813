use super::super::ApiState;
use super::{is_valid_wallet_address, ApiResponse};
use crate::config::DefaultConfig;
use crate::database::operations::WatchlistOperations;
use crate::types::{build_transfer_views, FetchOptions};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TransferQuery {
    pub chain_id: Option<u64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl TransferQuery {
    fn to_options(&self, defaults: &DefaultConfig) -> FetchOptions {
        let mut options = FetchOptions {
            chain_id: defaults.chain_id,
            page_size: defaults.page_size,
            ..FetchOptions::default()
        };
        if let Some(chain_id) = self.chain_id {
            options.chain_id = chain_id;
        }
        if let Some(page) = self.page {
            options.page = page;
        }
        if let Some(page_size) = self.page_size {
            options.page_size = page_size;
        }
        options
    }
}

/// 获取钱包转账记录API接口
///
/// # 参数
/// * `address` - 钱包地址
/// * `params` - 查询参数，包含以下字段：
///   - `chain_id`: 可选，链ID，默认1
///   - `page`: 可选，页码，默认1
///   - `page_size`: 可选，每页记录数，默认50，最大100
///
/// # 返回值
/// 返回按时间倒序、标注方向并格式化金额的转账视图列表。
/// 未配置任何数据源密钥时返回空列表，由前端展示配置提示
///
/// # 示例请求
/// ```text
/// GET /api/wallets/0x123.../transfers?chain_id=1&page_size=20
/// ```
pub async fn get_wallet_transfers(
    Path(address): Path<String>,
    Query(params): Query<TransferQuery>,
    State(state): State<ApiState>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    // 验证钱包地址格式
    if !is_valid_wallet_address(&address) {
        return Err(ApiResponse::<()>::error(
            StatusCode::BAD_REQUEST,
            "Invalid wallet address format".to_string(),
        ));
    }

    // 验证分页参数
    if let Some(page_size) = params.page_size {
        if page_size == 0 || page_size > 100 {
            return Err(ApiResponse::<()>::error(
                StatusCode::BAD_REQUEST,
                "Page size must be between 1 and 100".to_string(),
            ));
        }
    }

    let options = params.to_options(&state.defaults);

    match state.transfers.fetch_token_transfers(&address, &options).await {
        Ok(transfers) => {
            let views = build_transfer_views(transfers, &address);
            let response = json!({
                "data": views,
                "has_any_api_key": state.transfers.has_any_api_key(),
            });
            Ok(ApiResponse::success(response))
        }
        Err(e) => {
            // 数据获取层的错误原样透出给前端
            tracing::error!("Failed to fetch transfers for {}: {}", address, e);
            Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ))
        }
    }
}

/// 获取全部监控地址转账记录API接口
///
/// 逐个地址顺序查询（不并发），单个地址失败不中断其余地址，
/// 失败信息随该地址的结果一起返回
pub async fn get_watchlist_transfers(
    Query(params): Query<TransferQuery>,
    State(state): State<ApiState>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    let entries = match WatchlistOperations::get_all_entries(state.database.pool()).await {
        Ok(entries) => entries,
        Err(e) => {
            let error_msg = format!("Failed to get watchlist: {}", e);
            tracing::error!("{}", error_msg);
            return Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_msg,
            ));
        }
    };

    let options = params.to_options(&state.defaults);
    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        match state
            .transfers
            .fetch_token_transfers(&entry.address, &options)
            .await
        {
            Ok(transfers) => {
                let views = build_transfer_views(transfers, &entry.address);
                results.push(json!({
                    "address": entry.address,
                    "label": entry.label,
                    "transfers": views,
                }));
            }
            Err(e) => {
                tracing::warn!("Failed to fetch transfers for {}: {}", entry.address, e);
                results.push(json!({
                    "address": entry.address,
                    "label": entry.label,
                    "error": e.to_string(),
                }));
            }
        }
    }

    let response = json!({
        "data": results,
        "has_any_api_key": state.transfers.has_any_api_key(),
    });
    Ok(ApiResponse::success(response))
}
