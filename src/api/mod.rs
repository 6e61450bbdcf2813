pub mod handlers;
pub mod routes;

pub use routes::create_router;

use crate::config::{DefaultConfig, ProvidersConfig};
use crate::database::Database;
use crate::services::TransferService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub database: Arc<Database>,
    pub transfers: Arc<TransferService>,
    pub providers: ProvidersConfig,
    pub defaults: DefaultConfig,
}

impl ApiState {
    pub fn new(
        database: Arc<Database>,
        transfers: Arc<TransferService>,
        providers: ProvidersConfig,
        defaults: DefaultConfig,
    ) -> Self {
        Self {
            database,
            transfers,
            providers,
            defaults,
        }
    }
}
