use crate::{
    api::{create_router, ApiState},
    config::Config,
    database::Database,
    services::TransferService,
};
use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub struct ApiService {
    config: Config,
    database: Arc<Database>,
    transfers: Arc<TransferService>,
}

impl ApiService {
    pub async fn new(config: Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;
        let database = Arc::new(Database::new(pool));
        let transfers = Arc::new(TransferService::new(&config.providers));

        Ok(Self {
            config,
            database,
            transfers,
        })
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 启动API服务...");

        self.database.create_tables().await?;

        let api_state = ApiState::new(
            Arc::clone(&self.database),
            Arc::clone(&self.transfers),
            self.config.providers.clone(),
            self.config.defaults.clone(),
        );

        let app = create_router(api_state);
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.server.host, self.config.server.port
        ))
        .await?;

        info!(
            "API Server starting on {}:{}",
            self.config.server.host, self.config.server.port
        );
        axum::serve(listener, app).await?;

        Ok(())
    }
}
