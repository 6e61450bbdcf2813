use super::super::ApiState;
use axum::{extract::State, response::Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub covalent_configured: bool,
    pub etherscan_configured: bool,
    pub has_any_api_key: bool,
}

/// 数据源配置状态，供前端决定是否展示配置提示
pub async fn get_provider_status(State(state): State<ApiState>) -> Json<ProviderStatus> {
    Json(ProviderStatus {
        covalent_configured: state.providers.covalent_api_key.is_some(),
        etherscan_configured: state.providers.etherscan_api_key.is_some(),
        has_any_api_key: state.providers.has_any_api_key(),
    })
}
