use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use api_ingress::{AlwaysReady, ApiIngress, ApiIngressConfig, ReadinessCheck};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{default_logging_config, AppConfig, CliArgs, DatabaseConfig};
use store::{ConnectOpts, StoreHandle};
use tokio_util::sync::CancellationToken;
use usuarios::{UsuariosConfig, UsuariosModule};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Usuarios Server - REST API over the usuarios collection
#[derive(Parser)]
#[command(name = "usuarios-server")]
#[command(about = "Usuarios Server - REST API over the usuarios collection")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Keep users in memory instead of the document store
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

/// `/ready` check backed by the store handle; no handle means the store was
/// unreachable at startup.
struct StoreReadiness(Option<StoreHandle>);

#[async_trait]
impl ReadinessCheck for StoreReadiness {
    async fn store_ready(&self) -> bool {
        match &self.0 {
            Some(store) => store.is_connected().await,
            None => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // ./.env may carry APP__* overrides, so it goes in before the config is read
    runtime::env::load_dotenv(None);

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let home_dir = PathBuf::from(&config.server.home_dir);
    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, &home_dir);

    for file in runtime::env::load_dotenv(Some(&home_dir)) {
        tracing::debug!("environment loaded from {}", file.display());
    }
    tracing::info!("Usuarios Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// HTTP settings from `modules.api_ingress`, falling back to `server.host/port`.
fn ingress_config(config: &AppConfig, args: &CliArgs) -> Result<ApiIngressConfig> {
    let mut ingress: ApiIngressConfig = config.module_config_or_default("api_ingress")?;

    if config.module_config("api_ingress").is_none() {
        ingress.bind_addr = format!("{}:{}", config.server.host, config.server.port);
        if config.server.timeout_sec > 0 {
            ingress.request_timeout_sec = config.server.timeout_sec;
        }
    } else if args.port.is_some() {
        ingress = ingress.with_port(config.server.port);
    }

    Ok(ingress)
}

fn connect_opts(db: &DatabaseConfig) -> ConnectOpts {
    ConnectOpts {
        max_pool_size: db.max_pool_size,
        connect_timeout: db.connect_timeout_ms.map(Duration::from_millis),
        server_selection_timeout: db.server_selection_timeout_ms.map(Duration::from_millis),
        app_name: Some("usuarios-server".to_string()),
    }
}

/// A missing or unreachable store is logged and the server keeps running.
async fn connect_store(db: Option<&DatabaseConfig>) -> Option<StoreHandle> {
    let Some(db) = db else {
        tracing::warn!("No database configuration found, running without document store");
        return None;
    };

    let url = match db.resolve_url() {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "document store not configured");
            return None;
        }
    };

    tracing::info!(
        "Connecting to document store: {}",
        store::redact_credentials_in_dsn(Some(&url))
    );
    StoreHandle::connect_or_log(&url, &db.name, connect_opts(db)).await
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let usuarios_config: UsuariosConfig = config.module_config_or_default("usuarios")?;
    let ingress_config = ingress_config(&config, &args)?;

    let store = if args.mock {
        None
    } else {
        connect_store(config.database.as_ref()).await
    };

    let (module, readiness): (UsuariosModule, Arc<dyn ReadinessCheck>) = match &store {
        _ if args.mock => (UsuariosModule::in_memory(usuarios_config), Arc::new(AlwaysReady)),
        Some(handle) => (
            UsuariosModule::with_store(handle, usuarios_config),
            Arc::new(StoreReadiness(Some(handle.clone()))),
        ),
        None => (
            UsuariosModule::unavailable("document store unreachable at startup", usuarios_config),
            Arc::new(StoreReadiness(None)),
        ),
    };

    if let Err(e) = module.migrate().await {
        tracing::error!(error = %format!("{e:#}"), "startup migration failed");
    }

    let ingress = ApiIngress::new(ingress_config)
        .with_readiness(readiness)
        .with_openapi(module.openapi());
    let router = ingress.build_router(module.register_rest(axum::Router::new()));

    let cancel = CancellationToken::new();
    let signals = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            match runtime::shutdown::wait_for_shutdown().await {
                Ok(()) => cancel.cancel(),
                Err(e) => tracing::error!(error = %e, "failed to install signal handlers"),
            }
        })
    };

    let served = ingress.serve(router, cancel).await;
    signals.abort();

    if let Some(store) = store {
        store.close().await;
    }

    served.context("HTTP server failed")?;
    tracing::info!("Usuarios Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: UsuariosConfig = config
        .module_config_or_default("usuarios")
        .context("modules.usuarios")?;
    let addr = ApiIngress::new(ingress_config(&config, &args)?).bind_addr()?;

    let store = if args.mock {
        "in-memory (--mock)".to_string()
    } else {
        match config.database.as_ref().map(DatabaseConfig::resolve_url) {
            Some(Ok(url)) => store::redact_credentials_in_dsn(Some(&url)),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "document store not configured");
                "not configured".to_string()
            }
            None => "not configured".to_string(),
        }
    };

    tracing::info!("Configuration is valid");
    println!("Configuration is valid");
    println!("  home dir:       {}", Path::new(&config.server.home_dir).display());
    println!("  bind address:   {addr}");
    println!("  document store: {store}");
    println!("{}", config.to_yaml()?);

    Ok(())
}
