use std::net::SocketAddr;

use thiserror::Error;

/// Failures while bringing the HTTP host up or running it.
#[derive(Debug, Error)]
pub enum IngressError {
    #[error("invalid bind address '{addr}'")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error")]
    Serve(#[source] std::io::Error),
}
