#![allow(dead_code)]
use anyhow::Result;
use std::time::Duration;

use store::{ConnectOpts, StoreHandle};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mongo::Mongo;

pub struct StoreUnderTest {
    pub store: StoreHandle,
    pub url: String,
    _container: ContainerAsync<Mongo>,
}

/// Start a throwaway MongoDB and connect a handle to it.
pub async fn bring_up_mongo() -> Result<StoreUnderTest> {
    let container = Mongo::default().start().await?;
    let port = container.get_host_port_ipv4(27017).await?;
    wait_for_tcp("127.0.0.1", port, Duration::from_secs(30)).await?;

    let url = format!("mongodb://127.0.0.1:{port}");
    let store = StoreHandle::connect(&url, "usuarios_test", ConnectOpts::default()).await?;

    Ok(StoreUnderTest {
        store,
        url,
        _container: container,
    })
}

async fn wait_for_tcp(host: &str, port: u16, timeout: Duration) -> Result<()> {
    use tokio::{
        net::TcpStream,
        time::{sleep, Instant},
    };
    let deadline = Instant::now() + timeout;
    loop {
        if TcpStream::connect((host, port)).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            anyhow::bail!("Timeout waiting for {host}:{port}");
        }
        sleep(Duration::from_millis(200)).await;
    }
}
