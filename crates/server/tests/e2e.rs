use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use server::startup::{build_app, serve};
use service::gateway::{InMemoryGateway, SharedGateway};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = configs::AppConfig::default();
    let gateway: SharedGateway = Arc::new(InMemoryGateway::new());
    let app = build_app(&cfg, gateway).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app.router).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_wine_round_trip_and_relay() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let created = c
        .put(format!("{}/api/v1/wines", app.base_url))
        .json(&json!({"wineryId": 3, "name": "Fiano", "style": "white"}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["id"].as_i64().unwrap();

    let fetched = c
        .get(format!("{}/api/v1/wines?wineId={}", app.base_url, id))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(fetched, created);

    let res = c
        .post(format!("{}/api/v1/rabbit", app.base_url))
        .json(&json!({"name": "label", "data": "bytes"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "success");
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_wine_id_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api/v1/wines?wineId=abc", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_graceful_shutdown_drains_and_returns() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::default();
    let gateway: SharedGateway = Arc::new(InMemoryGateway::new());
    let app = build_app(&cfg, gateway).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve(app, listener, async move {
        let _ = stop_rx.await;
    }));

    let res = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    drop(res);

    let _ = stop_tx.send(());
    tokio::time::timeout(std::time::Duration::from_secs(5), server).await???;
    assert!(reqwest::get(format!("{}/health", base_url)).await.is_err());
    Ok(())
}
