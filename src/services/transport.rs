//! HTTP传输层
//!
//! 只负责发起请求并返回解析后的JSON。状态码非成功时读取响应体原文，
//! 连同状态码一起返回，供数据源适配层解析业务错误。
//! 不做重试，不配置超时，失败立即向上传播

use crate::types::FetchError;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// 发起GET请求并返回解析后的JSON
    pub async fn get_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Value, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", "WalletMonitor/1.0");

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }
}
