//! Process-level plumbing shared by the server binary: layered configuration,
//! logging setup, home directory resolution, `.env` loading and OS shutdown
//! signals.

pub mod config;
pub mod env;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
