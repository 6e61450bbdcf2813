// TransferSource, TokenTransfer, FetchOptions, SortOrder
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 默认代币精度（数据源未返回时使用）
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// 转账记录的数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferSource {
    Covalent,
    Etherscan,
}

impl TransferSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferSource::Covalent => "covalent",
            TransferSource::Etherscan => "etherscan",
        }
    }
}

/// 标准化的代币转账记录
///
/// 所有数据源的原始返回统一映射为该结构，每次查询重新构建，不做持久化。
/// `raw_value` 保留数据源返回的最小单位金额字符串，不解析为数值类型，
/// 避免超过64位范围的金额丢失精度。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub source: TransferSource,
    pub transaction_hash: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub contract_address: Option<String>,
    pub raw_value: String,
    pub token_decimals: u32,
}

/// 查询结果排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// 转账历史查询参数
///
/// 单页查询，不支持翻页遍历。`page` 和 `sort_order` 仅Etherscan使用。
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub chain_id: u64,
    pub page: u64,
    pub page_size: u64,
    pub sort_order: SortOrder,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chain_id: 1,
            page: 1,
            page_size: 50,
            sort_order: SortOrder::Desc,
        }
    }
}
