//! 转账查询协调层
//!
//! 公共查询入口。按已配置的密钥在调用时选择数据源：优先Etherscan，
//! 失败时顺序回退Covalent（不并发竞速）。两个密钥都未配置时返回
//! 空列表而不是错误，由前端展示配置提示

use crate::config::ProvidersConfig;
use crate::services::{CovalentClient, EtherscanClient};
use crate::types::{FetchError, FetchOptions, TokenTransfer};
use tracing::{debug, warn};

pub struct TransferService {
    covalent: CovalentClient,
    etherscan: EtherscanClient,
}

impl TransferService {
    pub fn new(providers: &ProvidersConfig) -> Self {
        Self {
            covalent: CovalentClient::new(providers),
            etherscan: EtherscanClient::new(providers),
        }
    }

    /// 用已构建的客户端组装服务
    pub fn with_clients(covalent: CovalentClient, etherscan: EtherscanClient) -> Self {
        Self {
            covalent,
            etherscan,
        }
    }

    /// 是否至少配置了一个数据源密钥
    pub fn has_any_api_key(&self) -> bool {
        self.covalent.is_configured() || self.etherscan.is_configured()
    }

    /// 查询地址的代币转账历史
    ///
    /// 选择策略：
    /// 1. 配置了Etherscan密钥则先查Etherscan，失败且配置了Covalent密钥时
    ///    回退Covalent并以其结果为最终结果；无法回退时原样抛出Etherscan的错误
    /// 2. 只配置了Covalent密钥则直接查Covalent
    /// 3. 都未配置返回空列表
    pub async fn fetch_token_transfers(
        &self,
        address: &str,
        options: &FetchOptions,
    ) -> Result<Vec<TokenTransfer>, FetchError> {
        if self.etherscan.is_configured() {
            match self.etherscan.fetch_token_transactions(address, options).await {
                Ok(transfers) => return Ok(transfers),
                Err(e) => {
                    if self.covalent.is_configured() {
                        warn!("⚠️ Etherscan查询失败，回退到Covalent: {}", e);
                        return self.covalent.fetch_transfers(address, options).await;
                    }
                    return Err(e);
                }
            }
        }

        if self.covalent.is_configured() {
            return self.covalent.fetch_transfers(address, options).await;
        }

        debug!("未配置任何数据源API密钥，跳过查询: {}", address);
        Ok(Vec::new())
    }
}
