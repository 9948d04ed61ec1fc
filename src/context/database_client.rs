use super::error::ClientError;
use super::service_config::ServiceEndpoint;
use crate::proto::database::{self, database_service_client::DatabaseServiceClient};
use crate::task::{Task, TaskHistory, TaskPage};
use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

/// Queries against the Database service, which stores tasks and their steps.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// List tasks, optionally filtered by user id (empty string for all users).
    async fn list_tasks(
        &self,
        user_id: &str,
        limit: i32,
        offset: i32,
    ) -> Result<TaskPage, ClientError>;

    /// Fetch the recorded steps of a task in the order the service stores them.
    async fn get_task_history(&self, task_id: &str) -> Result<TaskHistory, ClientError>;

    /// Fetch a single task. `None` when the service reports it as not found.
    async fn get_task(&self, task_id: &str) -> Result<Option<Task>, ClientError>;

    /// Open a fresh connection to the service to see whether it is reachable.
    async fn check_connection(&self) -> Result<(), ClientError>;
}

/// gRPC implementation of [`DatabaseClient`] over a lazily connected channel.
#[derive(Clone)]
pub struct GrpcDatabaseClient {
    endpoint: Endpoint,
    client: DatabaseServiceClient<Channel>,
}

impl GrpcDatabaseClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self, ClientError> {
        let endpoint = endpoint.to_endpoint()?;
        let client = DatabaseServiceClient::new(endpoint.connect_lazy());
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl DatabaseClient for GrpcDatabaseClient {
    async fn list_tasks(
        &self,
        user_id: &str,
        limit: i32,
        offset: i32,
    ) -> Result<TaskPage, ClientError> {
        debug!(user_id, limit, offset, "ListTasks");
        let request = database::ListTasksRequest {
            user_id: user_id.to_string(),
            limit,
            offset,
        };
        let mut client = self.client.clone();
        let response = client
            .list_tasks(request)
            .await
            .inspect_err(|status| warn!(code = ?status.code(), "ListTasks failed"))?;
        Ok(response.into_inner().into())
    }

    async fn get_task_history(&self, task_id: &str) -> Result<TaskHistory, ClientError> {
        debug!(task_id, "GetTaskHistory");
        let request = database::GetTaskHistoryRequest {
            task_id: task_id.to_string(),
        };
        let mut client = self.client.clone();
        let response = client
            .get_task_history(request)
            .await
            .inspect_err(|status| warn!(code = ?status.code(), "GetTaskHistory failed"))?;
        Ok(response.into_inner().into())
    }

    async fn get_task(&self, task_id: &str) -> Result<Option<Task>, ClientError> {
        debug!(task_id, "GetTask");
        let request = database::GetTaskRequest {
            task_id: task_id.to_string(),
        };
        let mut client = self.client.clone();
        let response = client
            .get_task(request)
            .await
            .inspect_err(|status| warn!(code = ?status.code(), "GetTask failed"))?
            .into_inner();

        if !response.success {
            return Ok(None);
        }
        Ok(response.task.map(Task::from))
    }

    async fn check_connection(&self) -> Result<(), ClientError> {
        self.endpoint.connect().await?;
        Ok(())
    }
}
