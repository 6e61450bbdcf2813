//! Etherscan数据源适配（备用数据源）
//!
//! 查询account/tokentx接口获取地址的ERC-20转账列表。不同链/接口版本
//! 返回的result字段形态不一致，按已知形态逐一尝试解析

use crate::config::ProvidersConfig;
use crate::services::transport::HttpTransport;
use crate::types::{
    FetchError, FetchOptions, TokenTransfer, TransferSource, DEFAULT_TOKEN_DECIMALS,
};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

const ETHERSCAN_API_BASE: &str = "https://api.etherscan.io";

/// 响应外层结构，result字段形态不定，保留原始JSON延迟解析
#[derive(Debug, Deserialize)]
struct EtherscanEnvelope {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    result: Value,
}

/// account/tokentx 返回的单条转账记录
///
/// 交易哈希在不同接口变体下的字段名不同，两个都接受
#[derive(Debug, Deserialize)]
struct EtherscanTokenTx {
    #[serde(alias = "transactionHash")]
    hash: Option<String>,
    #[serde(rename = "timeStamp")]
    time_stamp: Option<String>,
    from: Option<String>,
    to: Option<String>,
    #[serde(rename = "tokenSymbol")]
    token_symbol: Option<String>,
    #[serde(rename = "tokenName")]
    token_name: Option<String>,
    #[serde(rename = "contractAddress")]
    contract_address: Option<String>,
    value: Option<String>,
    #[serde(rename = "tokenDecimal")]
    token_decimal: Option<String>,
}

/// result字段的已知形态
#[derive(Debug)]
enum EtherscanResult {
    /// 转账记录列表
    Records(Vec<EtherscanTokenTx>),
    /// 数据源确认无记录（按成功的空列表处理）
    NoTransactions,
    /// 无法识别的失败形态
    Failure { message: String, payload: String },
}

/// 按文档顺序逐一尝试解析result字段
fn classify_result(envelope: EtherscanEnvelope) -> EtherscanResult {
    let EtherscanEnvelope {
        status,
        message,
        result,
    } = envelope;

    // 形态1: result直接是记录数组
    if result.is_array() {
        if let Ok(records) = serde_json::from_value::<Vec<EtherscanTokenTx>>(result.clone()) {
            return EtherscanResult::Records(records);
        }
    }

    // 形态2: 旧版status标记（status == "1" 或 message == "OK"）包装的记录数组
    if status.as_deref() == Some("1") || message.as_deref() == Some("OK") {
        if let Ok(records) = serde_json::from_value::<Vec<EtherscanTokenTx>>(result.clone()) {
            return EtherscanResult::Records(records);
        }
    }

    // 形态3: 检查message，"无记录"是成功而不是错误
    let message = message.unwrap_or_default();
    if message.to_lowercase().contains("no transactions found") {
        return EtherscanResult::NoTransactions;
    }

    EtherscanResult::Failure {
        message,
        payload: result.to_string(),
    }
}

pub struct EtherscanClient {
    transport: HttpTransport,
    api_key: Option<String>,
    base_url: String,
}

impl EtherscanClient {
    pub fn new(providers: &ProvidersConfig) -> Self {
        Self::with_base_url(providers, ETHERSCAN_API_BASE)
    }

    /// 指定接口地址构建客户端
    pub fn with_base_url(providers: &ProvidersConfig, base_url: impl Into<String>) -> Self {
        Self {
            transport: HttpTransport::new(),
            api_key: providers.etherscan_api_key.clone(),
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 查询地址的ERC-20转账列表
    ///
    /// 未配置ETHERSCAN_API_KEY时在发起网络请求前立即返回配置错误。
    /// 密钥通过apikey查询参数传递
    pub async fn fetch_token_transactions(
        &self,
        address: &str,
        options: &FetchOptions,
    ) -> Result<Vec<TokenTransfer>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey("ETHERSCAN_API_KEY"))?;

        let url = format!(
            "{}/v2/api?chainid={}&module=account&action=tokentx&address={}&page={}&offset={}&sort={}&apikey={}",
            self.base_url,
            options.chain_id,
            address,
            options.page,
            options.page_size,
            options.sort_order.as_str(),
            api_key
        );

        let value = self.transport.get_json(&url, &[]).await?;
        let envelope: EtherscanEnvelope = serde_json::from_value(value)?;

        match classify_result(envelope) {
            EtherscanResult::Records(records) => {
                Ok(records.iter().map(normalize_token_tx).collect())
            }
            EtherscanResult::NoTransactions => Ok(Vec::new()),
            EtherscanResult::Failure { message, payload } => {
                Err(FetchError::Provider { message, payload })
            }
        }
    }
}

/// 将单条记录映射为标准化转账
fn normalize_token_tx(tx: &EtherscanTokenTx) -> TokenTransfer {
    // timeStamp是Unix秒级时间戳字符串
    let timestamp = tx
        .time_stamp
        .as_deref()
        .and_then(|t| t.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now);

    TokenTransfer {
        source: TransferSource::Etherscan,
        transaction_hash: tx.hash.clone(),
        timestamp,
        from_address: tx.from.clone().unwrap_or_default(),
        to_address: tx.to.clone().unwrap_or_default(),
        token_symbol: tx.token_symbol.clone(),
        token_name: tx.token_name.clone(),
        contract_address: tx.contract_address.clone(),
        raw_value: tx.value.clone().unwrap_or_else(|| "0".to_string()),
        token_decimals: tx
            .token_decimal
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_DECIMALS),
    }
}
