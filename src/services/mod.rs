pub mod api_service;
pub mod covalent;
pub mod etherscan;
pub mod transfer_service;
pub mod transport;

pub use api_service::ApiService;
pub use covalent::CovalentClient;
pub use etherscan::EtherscanClient;
pub use transfer_service::TransferService;
pub use transport::HttpTransport;
