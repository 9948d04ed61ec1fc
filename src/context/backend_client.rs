use super::error::ClientError;
use super::service_config::ServiceEndpoint;
use crate::proto::backend::{self, backend_service_client::BackendServiceClient};
use crate::task::{StartTaskReply, StartTaskRequest};
use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

/// Calls into the Backend service, which launches automation tasks.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Ask the Backend to start a task. A `success: false` reply is returned
    /// as `Ok` so the caller can show the service's message.
    async fn start_task(&self, request: StartTaskRequest) -> Result<StartTaskReply, ClientError>;

    /// Open a fresh connection to the service to see whether it is reachable.
    async fn check_connection(&self) -> Result<(), ClientError>;
}

/// gRPC implementation of [`BackendClient`].
///
/// The channel is created lazily, so constructing the client never touches the
/// network. Every call is a single attempt with tonic's default timeouts.
#[derive(Clone)]
pub struct GrpcBackendClient {
    endpoint: Endpoint,
    client: BackendServiceClient<Channel>,
}

impl GrpcBackendClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self, ClientError> {
        let endpoint = endpoint.to_endpoint()?;
        let client = BackendServiceClient::new(endpoint.connect_lazy());
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl BackendClient for GrpcBackendClient {
    async fn start_task(&self, request: StartTaskRequest) -> Result<StartTaskReply, ClientError> {
        debug!(
            user_id = %request.user_id,
            max_steps = request.max_steps,
            browser = request.browser_name.as_str(),
            "StartTask"
        );
        let mut client = self.client.clone();
        let response = client
            .start_task(backend::StartTaskRequest::from(request))
            .await
            .inspect_err(|status| warn!(code = ?status.code(), "StartTask failed"))?;
        Ok(response.into_inner().into())
    }

    async fn check_connection(&self) -> Result<(), ClientError> {
        self.endpoint.connect().await?;
        Ok(())
    }
}
