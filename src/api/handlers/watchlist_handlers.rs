use super::super::ApiState;
use super::{is_valid_wallet_address, ApiResponse};
use crate::database::operations::WatchlistOperations;
use crate::types::{CreateWatchlistEntry, UpdateWatchlistEntry};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

/// 获取监控地址列表API接口
pub async fn get_watchlist(
    State(state): State<ApiState>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    match WatchlistOperations::get_all_entries(state.database.pool()).await {
        Ok(entries) => Ok(ApiResponse::success(entries)),
        Err(e) => {
            let error_msg = format!("Failed to get watchlist: {}", e);
            tracing::error!("{}", error_msg);
            Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_msg,
            ))
        }
    }
}

/// 添加监控地址API接口
///
/// # 参数
/// * `payload` - 包含以下字段：
///   - `address`: 钱包地址（0x前缀，42位）
///   - `label`: 可选，地址备注
pub async fn add_watchlist_entry(
    State(state): State<ApiState>,
    Json(payload): Json<CreateWatchlistEntry>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    // 验证钱包地址格式
    if !is_valid_wallet_address(&payload.address) {
        return Err(ApiResponse::<()>::error(
            StatusCode::BAD_REQUEST,
            "Invalid wallet address format".to_string(),
        ));
    }

    match WatchlistOperations::add_entry(state.database.pool(), &payload).await {
        Ok(entry) => Ok(ApiResponse::success(entry)),
        Err(e) => {
            // 唯一约束冲突返回409
            if e.to_string().contains("duplicate key") {
                return Err(ApiResponse::<()>::error(
                    StatusCode::CONFLICT,
                    "Address already in watchlist".to_string(),
                ));
            }
            let error_msg = format!("Failed to add watchlist entry: {}", e);
            tracing::error!("{}", error_msg);
            Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_msg,
            ))
        }
    }
}

/// 更新监控地址备注API接口
pub async fn update_watchlist_entry(
    Path(address): Path<String>,
    State(state): State<ApiState>,
    Json(payload): Json<UpdateWatchlistEntry>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    if !is_valid_wallet_address(&address) {
        return Err(ApiResponse::<()>::error(
            StatusCode::BAD_REQUEST,
            "Invalid wallet address format".to_string(),
        ));
    }

    match WatchlistOperations::update_label(
        state.database.pool(),
        &address,
        payload.label.as_deref(),
    )
    .await
    {
        Ok(Some(entry)) => Ok(ApiResponse::success(entry)),
        Ok(None) => Err(ApiResponse::<()>::error(
            StatusCode::NOT_FOUND,
            "Watchlist entry not found".to_string(),
        )),
        Err(e) => {
            let error_msg = format!("Failed to update watchlist entry: {}", e);
            tracing::error!("{}", error_msg);
            Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_msg,
            ))
        }
    }
}

/// 移除监控地址API接口
pub async fn remove_watchlist_entry(
    Path(address): Path<String>,
    State(state): State<ApiState>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    if !is_valid_wallet_address(&address) {
        return Err(ApiResponse::<()>::error(
            StatusCode::BAD_REQUEST,
            "Invalid wallet address format".to_string(),
        ));
    }

    match WatchlistOperations::remove_entry(state.database.pool(), &address).await {
        Ok(true) => Ok(ApiResponse::success(json!({ "removed": address.to_lowercase() }))),
        Ok(false) => Err(ApiResponse::<()>::error(
            StatusCode::NOT_FOUND,
            "Watchlist entry not found".to_string(),
        )),
        Err(e) => {
            let error_msg = format!("Failed to remove watchlist entry: {}", e);
            tracing::error!("{}", error_msg);
            Err(ApiResponse::<()>::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_msg,
            ))
        }
    }
}
