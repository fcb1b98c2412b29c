//! MongoDB store adapter.
//!
//! Owns the single process-wide client. The handle is built once at startup,
//! cloned into repositories, and closed on shutdown.
//!
//! ```rust,no_run
//! # async fn demo() -> store::Result<()> {
//! use store::{ConnectOpts, StoreHandle};
//!
//! let store = StoreHandle::connect("mongodb://localhost:27017", "usuarios", ConnectOpts::default()).await?;
//! assert!(store.is_connected().await);
//! store.close().await;
//! # Ok(())
//! # }
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection, Database,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database URL not configured")]
    MissingUrl,

    #[error("invalid connection string {dsn}: {source}")]
    InvalidUrl {
        dsn: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("failed to reach {dsn}: {source}")]
    Unreachable {
        dsn: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Client tuning applied on top of whatever the connection string carries.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    pub max_pool_size: Option<u32>,
    pub connect_timeout: Option<Duration>,
    pub server_selection_timeout: Option<Duration>,
    pub app_name: Option<String>,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_pool_size: Some(10),
            connect_timeout: Some(Duration::from_secs(5)),
            server_selection_timeout: Some(Duration::from_secs(5)),
            app_name: Some("usuarios".to_string()),
        }
    }
}

impl ConnectOpts {
    fn apply(&self, opts: &mut ClientOptions) {
        if let Some(n) = self.max_pool_size {
            opts.max_pool_size = Some(n);
        }
        if let Some(t) = self.connect_timeout {
            opts.connect_timeout = Some(t);
        }
        if let Some(t) = self.server_selection_timeout {
            opts.server_selection_timeout = Some(t);
        }
        if opts.app_name.is_none() {
            opts.app_name = self.app_name.clone();
        }
    }
}

/// Cheap to clone; every clone shares the same driver pool.
#[derive(Clone, Debug)]
pub struct StoreHandle {
    client: Client,
    db: Database,
    dsn: String,
    connected: Arc<AtomicBool>,
}

impl StoreHandle {
    /// Parse the connection string, build the client and verify it with a ping.
    pub async fn connect(url: &str, db_name: &str, opts: ConnectOpts) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::MissingUrl);
        }
        let dsn = redact_credentials_in_dsn(Some(url));

        let mut client_opts =
            ClientOptions::parse(url)
                .await
                .map_err(|source| StoreError::InvalidUrl {
                    dsn: dsn.clone(),
                    source,
                })?;
        opts.apply(&mut client_opts);

        let client = Client::with_options(client_opts)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| StoreError::Unreachable {
                dsn: dsn.clone(),
                source,
            })?;

        tracing::info!(dsn = %dsn, database = db_name, "connected to document store");

        Ok(Self {
            client,
            db,
            dsn,
            connected: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Like [`connect`](Self::connect) but logs the failure instead of returning it.
    pub async fn connect_or_log(url: &str, db_name: &str, opts: ConnectOpts) -> Option<Self> {
        match Self::connect(url, db_name, opts).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "document store connection failed");
                None
            }
        }
    }

    /// Round-trip to the server; updates the connected flag either way.
    pub async fn ping(&self) -> Result<()> {
        let res = self.db.run_command(doc! { "ping": 1 }).await;
        self.connected.store(res.is_ok(), Ordering::Relaxed);
        res.map(|_| ()).map_err(StoreError::from)
    }

    pub async fn is_connected(&self) -> bool {
        self.ping().await.is_ok()
    }

    /// Last observed connection state, without touching the network.
    pub fn was_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection::<T>(name)
    }

    /// Connection string with the password masked.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Drain the pool and end server sessions.
    pub async fn close(self) {
        self.connected.store(false, Ordering::Relaxed);
        self.client.shutdown().await;
        tracing::info!(dsn = %self.dsn, "document store connection closed");
    }
}

/// Mask the password of a connection string for logging.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => match url::Url::parse(dsn) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "***".to_string(),
        },
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}
