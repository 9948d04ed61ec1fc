pub mod backend_client;
pub mod database_client;
pub mod error;
pub mod service_config;

use backend_client::{BackendClient, GrpcBackendClient};
use database_client::{DatabaseClient, GrpcDatabaseClient};
use error::ClientError;
use service_config::ServiceConfig;

use std::sync::Arc;

/// Handles to the two remote services, shared by every view.
///
/// Built once at start-up. The gRPC clients connect lazily, so building a
/// context succeeds even when neither service is running.
#[derive(Clone)]
pub struct AppContext {
    backend_client: Arc<dyn BackendClient>,
    database_client: Arc<dyn DatabaseClient>,
    service_config: Arc<ServiceConfig>,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    pub fn backend_client(&self) -> Arc<dyn BackendClient> {
        Arc::clone(&self.backend_client)
    }

    pub fn database_client(&self) -> Arc<dyn DatabaseClient> {
        Arc::clone(&self.database_client)
    }

    pub fn service_config(&self) -> Arc<ServiceConfig> {
        Arc::clone(&self.service_config)
    }
}

pub struct AppContextBuilder {
    backend_client: Option<Arc<dyn BackendClient>>,
    database_client: Option<Arc<dyn DatabaseClient>>,
    service_config: Option<ServiceConfig>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self {
            backend_client: None,
            database_client: None,
            service_config: None,
        }
    }

    pub fn with_service_config(mut self, service_config: ServiceConfig) -> Self {
        self.service_config = Some(service_config);
        self
    }

    pub fn with_backend_client(mut self, backend_client: Arc<dyn BackendClient>) -> Self {
        self.backend_client = Some(backend_client);
        self
    }

    pub fn with_database_client(mut self, database_client: Arc<dyn DatabaseClient>) -> Self {
        self.database_client = Some(database_client);
        self
    }

    /// Build the context, creating gRPC clients for any service not supplied.
    ///
    /// Must run inside a tokio runtime because lazy channels spawn their
    /// connection worker on first use. Fails only on a malformed endpoint.
    pub fn build(self) -> Result<AppContext, ClientError> {
        let service_config = self.service_config.unwrap_or_default();

        let backend_client: Arc<dyn BackendClient> = match self.backend_client {
            Some(client) => client,
            None => Arc::new(GrpcBackendClient::new(&service_config.backend)?),
        };
        let database_client: Arc<dyn DatabaseClient> = match self.database_client {
            Some(client) => client,
            None => Arc::new(GrpcDatabaseClient::new(&service_config.database)?),
        };

        Ok(AppContext {
            backend_client,
            database_client,
            service_config: Arc::new(service_config),
        })
    }
}

impl Default for AppContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl AppContext {
    /// Context wired to the given fakes.
    pub fn with_fakes(
        backend_client: Arc<dyn BackendClient>,
        database_client: Arc<dyn DatabaseClient>,
    ) -> Self {
        AppContextBuilder::new()
            .with_backend_client(backend_client)
            .with_database_client(database_client)
            .build()
            .expect("context with fake clients")
    }
}
