#![cfg(test)]
use std::sync::Arc;

use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

use crate::gateway::{InMemoryGateway, RepositoryGateway};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_optional(&configs::config_path())
        .ok()
        .flatten()
        .map(|c| c.database)
        .unwrap_or_default();
    cfg.normalize_from_env();
    cfg.max_connections = cfg.max_connections.max(5);
    cfg.min_connections = cfg.min_connections.clamp(1, cfg.max_connections);
    cfg.connect_timeout_secs = cfg.connect_timeout_secs.max(1);
    cfg.acquire_timeout_secs = cfg.acquire_timeout_secs.max(10);
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&db_config()).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    let db = connect_with_config(&db_config()).await?;
    Ok(db)
}

/// Fresh in-memory gateway, both as its concrete type and as a trait object.
pub fn memory_gateway() -> (Arc<InMemoryGateway>, Arc<dyn RepositoryGateway>) {
    let gw = Arc::new(InMemoryGateway::new());
    let shared: Arc<dyn RepositoryGateway> = gw.clone();
    (gw, shared)
}
