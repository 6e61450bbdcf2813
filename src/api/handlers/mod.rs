pub mod status_handlers;
pub mod transfer_handlers;
pub mod watchlist_handlers;

pub use status_handlers::*;
pub use transfer_handlers::*;
pub use watchlist_handlers::*;

use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> (StatusCode, String) {
        let response = Self {
            success: true,
            data: Some(data),
            message: None,
        };
        (StatusCode::OK, serde_json::to_string(&response).unwrap())
    }

    fn error(status: StatusCode, message: String) -> (StatusCode, String) {
        let response = Self {
            success: false,
            data: None,
            message: Some(message),
        };
        (status, serde_json::to_string(&response).unwrap())
    }
}

/// 校验钱包地址格式（0x前缀的42位字符串）
fn is_valid_wallet_address(address: &str) -> bool {
    address.len() == 42 && address.starts_with("0x")
}
