use thiserror::Error;

/// 数据获取层的统一错误类型
///
/// 配置缺失在发起任何网络请求前返回；HTTP错误保留状态码和响应体原文，
/// 供上层做数据源相关的错误解析
#[derive(Debug, Error)]
pub enum FetchError {
    /// 缺少数据源API密钥
    #[error("缺少必需配置: {0}")]
    MissingApiKey(&'static str),

    /// HTTP响应状态码非成功
    #[error("HTTP请求失败: {status} - {body}")]
    Http { status: u16, body: String },

    /// 网络层错误（DNS解析、连接超时、连接重置等）
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),

    /// 响应内容不是合法JSON
    #[error("响应解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 数据源在传输层成功但返回了业务错误
    #[error("数据源返回错误: {message} (result: {payload})")]
    Provider { message: String, payload: String },
}
