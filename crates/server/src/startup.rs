use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, BrokerBackend, BrokerConfig, RepositoryBackend};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{
    gateway::{InMemoryGateway, SeaOrmGateway, SharedGateway},
    relay::{AmqpBroker, InMemoryBroker, MessageBroker, MessageRelayListener, MessageRelaySender},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the TOML config, falling back to environment variables only when the
/// file does not exist. A file that fails to read or parse stops startup.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = configs::config_path();
    let mut cfg = match configs::load_optional(&path).map_err(|e| StartupError::InvalidConfig(e.to_string()))? {
        Some(cfg) => cfg,
        None => {
            info!(%path, "no config file; using environment");
            AppConfig::from_env()
        }
    };
    cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Pick the gateway backend; the postgres backend migrates its schema first.
pub async fn build_gateway(cfg: &AppConfig) -> anyhow::Result<SharedGateway> {
    match cfg.repository.backend {
        RepositoryBackend::Memory => {
            info!("using in-memory repository gateway");
            Ok(Arc::new(InMemoryGateway::new()))
        }
        RepositoryBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!("using postgres repository gateway");
            Ok(Arc::new(SeaOrmGateway::new(db)))
        }
    }
}

/// Pick the relay broker; the AMQP backend declares its topology on connect.
pub async fn build_broker(cfg: &BrokerConfig) -> anyhow::Result<Arc<dyn MessageBroker>> {
    match cfg.backend {
        BrokerBackend::Memory => {
            info!("using in-process message broker");
            Ok(InMemoryBroker::with_topology(cfg).await?)
        }
        BrokerBackend::Amqp => Ok(AmqpBroker::connect(cfg).await?),
    }
}

/// Everything the HTTP server needs, with the relay listener already consuming.
pub struct App {
    pub router: Router,
    pub listener: MessageRelayListener,
}

pub async fn build_app(cfg: &AppConfig, gateway: SharedGateway) -> anyhow::Result<App> {
    let broker = build_broker(&cfg.broker).await?;
    let listener = MessageRelayListener::start(Arc::clone(&broker), &cfg.broker).await?;
    let sender = MessageRelaySender::new(broker, &cfg.broker);
    let state = AppState::new(gateway, sender);
    Ok(App { router: routes::build_router(state, build_cors()), listener })
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Serve `app` until `shutdown` resolves, then drain in-flight requests and
/// stop the relay consumers.
pub async fn serve<F>(app: App, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let App { router, listener: relay } = app;
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await?;
    relay.stop();
    info!("http server and relay listener stopped");
    Ok(())
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            error!(error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let gateway = build_gateway(&cfg).await?;
    let app = build_app(&cfg, gateway).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting wine service");
    let listener = TcpListener::bind(addr).await?;
    serve(app, listener, ctrl_c()).await
}
