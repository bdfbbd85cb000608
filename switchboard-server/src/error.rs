use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("coordinator is no longer running")]
    CoordinatorClosed,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}
