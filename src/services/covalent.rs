//! Covalent数据源适配（主数据源）
//!
//! 查询transfers_v2接口获取地址的代币转账历史。一条链上交易可能携带
//! 多个代币转账事件，摊平为每个事件一条标准化记录

use crate::config::ProvidersConfig;
use crate::services::transport::HttpTransport;
use crate::types::{
    FetchError, FetchOptions, TokenTransfer, TransferSource, DEFAULT_TOKEN_DECIMALS,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const COVALENT_API_BASE: &str = "https://api.covalenthq.com";

// transfers_v2 响应结构
#[derive(Debug, Deserialize)]
struct CovalentResponse {
    data: Option<CovalentData>,
}

#[derive(Debug, Deserialize)]
struct CovalentData {
    #[serde(default)]
    items: Vec<CovalentItem>,
}

/// 一条链上交易
#[derive(Debug, Deserialize)]
struct CovalentItem {
    tx_hash: Option<String>,
    block_signed_at: Option<String>,
    #[serde(default)]
    transfers: Vec<CovalentTransferEvent>,
}

/// 交易内嵌套的单个代币转账事件
#[derive(Debug, Deserialize)]
struct CovalentTransferEvent {
    from_address: Option<String>,
    to_address: Option<String>,
    contract_ticker_symbol: Option<String>,
    contract_name: Option<String>,
    contract_address: Option<String>,
    delta: Option<String>,
    contract_decimals: Option<u32>,
}

pub struct CovalentClient {
    transport: HttpTransport,
    api_key: Option<String>,
    base_url: String,
}

impl CovalentClient {
    pub fn new(providers: &ProvidersConfig) -> Self {
        Self::with_base_url(providers, COVALENT_API_BASE)
    }

    /// 指定接口地址构建客户端
    pub fn with_base_url(providers: &ProvidersConfig, base_url: impl Into<String>) -> Self {
        Self {
            transport: HttpTransport::new(),
            api_key: providers.covalent_api_key.clone(),
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 查询地址的代币转账历史
    ///
    /// 未配置COVALENT_API_KEY时在发起网络请求前立即返回配置错误
    pub async fn fetch_transfers(
        &self,
        address: &str,
        options: &FetchOptions,
    ) -> Result<Vec<TokenTransfer>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey("COVALENT_API_KEY"))?;

        let url = format!(
            "{}/v1/{}/address/{}/transfers_v2/?page-size={}",
            self.base_url, options.chain_id, address, options.page_size
        );
        let auth = format!("Bearer {}", api_key);

        let value = self
            .transport
            .get_json(&url, &[("Authorization", auth.as_str())])
            .await?;
        let response: CovalentResponse = serde_json::from_value(value)?;

        let items = response.data.map(|d| d.items).unwrap_or_default();
        Ok(items.iter().flat_map(normalize_item).collect())
    }
}

/// 将一条交易的嵌套转账事件摊平为标准化记录
///
/// 每个事件继承所在交易的哈希和区块时间
fn normalize_item(item: &CovalentItem) -> Vec<TokenTransfer> {
    let timestamp = item
        .block_signed_at
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    item.transfers
        .iter()
        .map(|event| TokenTransfer {
            source: TransferSource::Covalent,
            transaction_hash: item.tx_hash.clone(),
            timestamp,
            from_address: event.from_address.clone().unwrap_or_default(),
            to_address: event.to_address.clone().unwrap_or_default(),
            token_symbol: event.contract_ticker_symbol.clone(),
            token_name: event.contract_name.clone(),
            contract_address: event.contract_address.clone(),
            // delta按数据源返回的最小单位字符串原样保留，不做精度换算
            raw_value: event.delta.clone().unwrap_or_else(|| "0".to_string()),
            token_decimals: event.contract_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_response() -> serde_json::Value {
        serde_json::json!({
            "data": {
                "items": [
                    {
                        "tx_hash": "0xdeadbeef",
                        "block_signed_at": "2024-01-15T08:30:00Z",
                        "transfers": [
                            {
                                "from_address": "0x1111",
                                "to_address": "0x2222",
                                "contract_ticker_symbol": "USDC",
                                "contract_name": "USD Coin",
                                "contract_address": "0xa0b8",
                                "delta": "5000000",
                                "contract_decimals": 6
                            },
                            {
                                "from_address": "0x2222",
                                "to_address": "0x3333",
                                "contract_ticker_symbol": "DAI",
                                "contract_name": "Dai Stablecoin",
                                "contract_address": "0x6b17",
                                "delta": "123456789012345678901234567890",
                                "contract_decimals": 18
                            }
                        ]
                    }
                ]
            }
        })
    }

    fn providers_with_key() -> ProvidersConfig {
        ProvidersConfig {
            covalent_api_key: Some("cqt_test".to_string()),
            etherscan_api_key: None,
        }
    }

    #[test]
    fn test_normalize_item_flattens_nested_transfers() {
        let response: CovalentResponse = serde_json::from_value(sample_response()).unwrap();
        let items = response.data.unwrap().items;
        let transfers = normalize_item(&items[0]);

        // 一条交易两个转账事件，摊平为两条记录，共享交易哈希和时间
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].transaction_hash.as_deref(), Some("0xdeadbeef"));
        assert_eq!(transfers[1].transaction_hash.as_deref(), Some("0xdeadbeef"));
        assert_eq!(transfers[0].timestamp, transfers[1].timestamp);
        assert_ne!(transfers[0].from_address, transfers[1].from_address);
        assert_eq!(transfers[0].source, TransferSource::Covalent);
        assert_eq!(transfers[0].raw_value, "5000000");
        assert_eq!(transfers[0].token_decimals, 6);
    }

    #[test]
    fn test_normalize_item_preserves_large_raw_value() {
        let response: CovalentResponse = serde_json::from_value(sample_response()).unwrap();
        let items = response.data.unwrap().items;
        let transfers = normalize_item(&items[0]);

        // 超过u64范围的金额必须原样保留字符串
        assert_eq!(transfers[1].raw_value, "123456789012345678901234567890");
    }

    #[test]
    fn test_normalize_item_idempotent() {
        let response: CovalentResponse = serde_json::from_value(sample_response()).unwrap();
        let items = response.data.unwrap().items;

        let first = normalize_item(&items[0]);
        let second = normalize_item(&items[0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_item_defaults() {
        let item: CovalentItem = serde_json::from_value(serde_json::json!({
            "tx_hash": null,
            "block_signed_at": "not-a-time",
            "transfers": [{"delta": null}]
        }))
        .unwrap();

        let transfers = normalize_item(&item);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].transaction_hash, None);
        assert_eq!(transfers[0].raw_value, "0");
        assert_eq!(transfers[0].token_decimals, DEFAULT_TOKEN_DECIMALS);
    }

    #[tokio::test]
    async fn test_fetch_transfers_sends_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/1/address/0xabc/transfers_v2/"))
            .and(query_param("page-size", "50"))
            .and(header("Authorization", "Bearer cqt_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = CovalentClient::with_base_url(&providers_with_key(), server.uri());
        let transfers = client
            .fetch_transfers("0xabc", &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(transfers.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_transfers_missing_key_fails_before_network() {
        let server = MockServer::start().await;

        let client = CovalentClient::with_base_url(&ProvidersConfig::default(), server.uri());
        let err = client
            .fetch_transfers("0xabc", &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::MissingApiKey("COVALENT_API_KEY")));
        // 配置错误必须在发起任何网络请求前返回
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
