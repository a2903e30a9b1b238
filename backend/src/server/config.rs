//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::DEFAULT_REQUEST_TIMEOUT;
use crate::domain::ports::CarRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn CarRepository>,
    pub(crate) request_timeout: Duration,
    pub(crate) workers: Option<usize>,
}

impl ServerConfig {
    /// Construct a server configuration serving `repository` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, repository: Arc<dyn CarRepository>) -> Self {
        Self {
            bind_addr,
            repository,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            workers: None,
        }
    }

    /// Override the deadline applied to each store call.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Fix the number of Actix workers; defaults to one per core.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::InMemoryCarRepository;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_service_timeout() {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("addr"),
            Arc::new(InMemoryCarRepository::new()),
        );
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert!(config.workers.is_none());
    }

    #[rstest]
    fn overrides_are_kept() {
        let config = ServerConfig::new(
            "127.0.0.1:9000".parse().expect("addr"),
            Arc::new(InMemoryCarRepository::new()),
        )
        .with_request_timeout(Duration::from_millis(50))
        .with_workers(2);
        assert_eq!(config.bind_addr().port(), 9000);
        assert_eq!(config.request_timeout(), Duration::from_millis(50));
        assert_eq!(config.workers, Some(2));
    }
}
