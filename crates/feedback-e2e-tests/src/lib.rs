pub mod fake_store;

use anyhow::{anyhow, Result};
use fake_store::{FakeStore, TEST_KEY};
use feedback_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use tracing::debug;
use url::Url;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Server configuration on a random port, store settings only if `store_url` is given
pub fn test_config(store_url: Option<&Url>) -> Result<ServerConfig> {
    let port = random_port()?.to_string();
    let base_url = format!("http://localhost:{}", port);
    let mut args = vec![
        "feedback-e2e-tests".to_string(),
        "--port".to_string(),
        port,
        "--base-url".to_string(),
        base_url,
    ];
    if let Some(url) = store_url {
        args.extend([
            "--store-url".to_string(),
            url.to_string(),
            "--store-key".to_string(),
            TEST_KEY.to_string(),
        ]);
    }
    let config = ServerConfig::try_parse_from(args)?;
    Ok(config)
}

/// Starts server in background and waits until it answers health checks
pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let health_url = args.base_url.join("health")?;
    tokio::spawn(async move {
        if let Err(e) = feedback_server::run::run(args).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            Ok(response) => debug!("Server not ready: {}", response.status()),
            Err(e) => debug!("Server not ready: {e}"),
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not start"))
}

/// Fake store plus server connected to it
pub async fn prepare_env() -> Result<(ServerConfig, FakeStore)> {
    let (store, store_url) = FakeStore::start().await?;
    let args = test_config(Some(&store_url))?;
    spawn_server(args.clone()).await?;
    Ok((args, store))
}
