//! Endpoints of the two remote services.
//!
//! Each host and port is resolved independently: command line flag first, then
//! the matching environment variable, then the fixed default below. The
//! flag/env layering is done by clap in `main.rs`; this module only holds the
//! resolved values.

use super::error::ClientError;
use tonic::transport::Endpoint;

pub const BACKEND_HOST_ENV: &str = "BACKEND_SERVICE_HOST";
pub const BACKEND_PORT_ENV: &str = "BACKEND_SERVICE_PORT";
pub const DATABASE_HOST_ENV: &str = "DATABASE_SERVICE_HOST";
pub const DATABASE_PORT_ENV: &str = "DATABASE_SERVICE_PORT";

pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_PORT: u16 = 50050;
pub const DEFAULT_DATABASE_HOST: &str = "localhost";
pub const DEFAULT_DATABASE_PORT: u16 = 50052;

/// Host and port of a single gRPC service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServiceEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Plaintext HTTP/2 URI for this endpoint.
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Build a tonic endpoint without connecting to it.
    pub fn to_endpoint(&self) -> Result<Endpoint, ClientError> {
        let uri = self.uri();
        Endpoint::from_shared(uri.clone())
            .map_err(|source| ClientError::InvalidEndpoint { uri, source })
    }
}

impl std::fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Where the Backend and Database services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub backend: ServiceEndpoint,
    pub database: ServiceEndpoint,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: ServiceEndpoint::new(DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT),
            database: ServiceEndpoint::new(DEFAULT_DATABASE_HOST, DEFAULT_DATABASE_PORT),
        }
    }
}
