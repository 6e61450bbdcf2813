//! 转账展示视图
//!
//! 将标准化转账记录转换为前端展示用的视图：按时间倒序排列、
//! 标注转账方向、格式化金额

use crate::types::{TokenTransfer, TransferSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 相对于查询地址的转账方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// 查询地址为转出方
    Out,
    /// 查询地址为转入方
    In,
    /// 查询地址与转账双方都不匹配
    Other,
}

/// 单条转账的展示视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferView {
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
    pub direction: TransferDirection,
    pub display_amount: String,
}

impl TransferView {
    /// 由标准化记录构建展示视图
    pub fn from_transfer(transfer: TokenTransfer, wallet_address: &str) -> Self {
        let direction = classify_direction(&transfer, wallet_address);
        let display_amount = format_token_amount(&transfer.raw_value, transfer.token_decimals);

        Self {
            source: transfer.source,
            transaction_hash: transfer.transaction_hash,
            timestamp: transfer.timestamp,
            from_address: transfer.from_address,
            to_address: transfer.to_address,
            token_symbol: transfer.token_symbol,
            token_name: transfer.token_name,
            contract_address: transfer.contract_address,
            raw_value: transfer.raw_value,
            token_decimals: transfer.token_decimals,
            direction,
            display_amount,
        }
    }
}

/// 构建钱包地址的转账展示列表（按时间倒序）
pub fn build_transfer_views(
    mut transfers: Vec<TokenTransfer>,
    wallet_address: &str,
) -> Vec<TransferView> {
    transfers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    transfers
        .into_iter()
        .map(|t| TransferView::from_transfer(t, wallet_address))
        .collect()
}

/// 判断转账方向（地址比较不区分大小写）
pub fn classify_direction(transfer: &TokenTransfer, wallet_address: &str) -> TransferDirection {
    let wallet = wallet_address.to_lowercase();
    if transfer.from_address.to_lowercase() == wallet {
        TransferDirection::Out
    } else if transfer.to_address.to_lowercase() == wallet {
        TransferDirection::In
    } else {
        TransferDirection::Other
    }
}

/// 将最小单位金额字符串格式化为可读的十进制字符串
///
/// 纯字符串运算，不经过任何数值类型，任意长度的金额都不丢失精度。
/// 非纯数字的输入原样返回。
pub fn format_token_amount(raw_value: &str, decimals: u32) -> String {
    if raw_value.is_empty() || !raw_value.bytes().all(|b| b.is_ascii_digit()) {
        return raw_value.to_string();
    }

    let digits = raw_value.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits.to_string();
    }

    if digits.len() <= decimals {
        // 整数部分为0，小数部分左侧补零
        let frac = format!("{:0>width$}", digits, width = decimals);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            "0".to_string()
        } else {
            format!("0.{}", frac)
        }
    } else {
        let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
        let frac = frac_part.trim_end_matches('0');
        if frac.is_empty() {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, frac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transfer(from: &str, to: &str, value: &str, decimals: u32) -> TokenTransfer {
        TokenTransfer {
            source: TransferSource::Etherscan,
            transaction_hash: Some("0xabc".to_string()),
            timestamp: Utc::now(),
            from_address: from.to_string(),
            to_address: to.to_string(),
            token_symbol: Some("USDT".to_string()),
            token_name: Some("Tether USD".to_string()),
            contract_address: None,
            raw_value: value.to_string(),
            token_decimals: decimals,
        }
    }

    #[test]
    fn test_format_token_amount() {
        // 1000000 / 10^6 = 1
        assert_eq!(format_token_amount("1000000", 6), "1");
        assert_eq!(format_token_amount("1500000", 6), "1.5");
        assert_eq!(format_token_amount("123", 6), "0.000123");
        assert_eq!(format_token_amount("0", 18), "0");
        assert_eq!(format_token_amount("42", 0), "42");
    }

    #[test]
    fn test_format_token_amount_preserves_precision() {
        // 超过u64范围的金额必须逐位保留
        let raw = "123456789012345678901234567890";
        assert_eq!(
            format_token_amount(raw, 18),
            "123456789012.34567890123456789"
        );
        assert_eq!(format_token_amount(raw, 0), raw);
    }

    #[test]
    fn test_format_token_amount_non_numeric_passthrough() {
        assert_eq!(format_token_amount("n/a", 18), "n/a");
        assert_eq!(format_token_amount("", 18), "");
    }

    #[test]
    fn test_classify_direction_case_insensitive() {
        let transfer = sample_transfer("0xAbC1", "0xDeF2", "100", 18);

        assert_eq!(
            classify_direction(&transfer, "0xabc1"),
            TransferDirection::Out
        );
        assert_eq!(
            classify_direction(&transfer, "0xDEF2"),
            TransferDirection::In
        );
        assert_eq!(
            classify_direction(&transfer, "0x9999"),
            TransferDirection::Other
        );
    }

    #[test]
    fn test_build_transfer_views_sorted_desc() {
        let mut old = sample_transfer("0x1", "0x2", "100", 18);
        old.timestamp = Utc::now() - chrono::Duration::hours(2);
        let new = sample_transfer("0x2", "0x1", "200", 18);

        let views = build_transfer_views(vec![old, new.clone()], "0x1");

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].raw_value, "200");
        assert_eq!(views[0].direction, TransferDirection::In);
        assert_eq!(views[1].direction, TransferDirection::Out);
    }
}
