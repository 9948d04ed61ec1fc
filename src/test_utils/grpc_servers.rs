//! In-process gRPC servers standing in for the real Backend and Database
//! services, bound to an ephemeral localhost port.

use crate::context::service_config::ServiceEndpoint;
use crate::proto::backend::{
    self,
    backend_service_server::{BackendService, BackendServiceServer},
};
use crate::proto::database::{
    self,
    database_service_server::{DatabaseService, DatabaseServiceServer},
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

struct FakeBackend;

#[tonic::async_trait]
impl BackendService for FakeBackend {
    async fn start_task(
        &self,
        request: Request<backend::StartTaskRequest>,
    ) -> Result<Response<backend::StartTaskResponse>, Status> {
        let req = request.into_inner();
        if req.task_prompt == "reject me" {
            return Ok(Response::new(backend::StartTaskResponse {
                success: false,
                task_id: String::new(),
                message: "prompt rejected".to_string(),
            }));
        }
        Ok(Response::new(backend::StartTaskResponse {
            success: true,
            task_id: "T1".to_string(),
            message: format!(
                "{}/{}/{}: {}",
                req.user_id, req.browser_name, req.max_steps, req.task_prompt
            ),
        }))
    }
}

struct FakeDatabase;

fn completed_task(task_id: &str) -> database::Task {
    database::Task {
        task_id: task_id.to_string(),
        task_prompt: "Find the cheapest flight to Lisbon".to_string(),
        status: "completed".to_string(),
        max_steps: 100,
        user_id: "alice".to_string(),
        created_at: 1_700_000_000,
        updated_at: 1_700_000_600,
        final_result: r#"{"price": 199}"#.to_string(),
    }
}

#[tonic::async_trait]
impl DatabaseService for FakeDatabase {
    async fn get_task(
        &self,
        request: Request<database::GetTaskRequest>,
    ) -> Result<Response<database::GetTaskResponse>, Status> {
        let task_id = request.into_inner().task_id;
        let response = if task_id == "T42" {
            database::GetTaskResponse {
                success: true,
                task: Some(completed_task(&task_id)),
            }
        } else {
            database::GetTaskResponse {
                success: false,
                task: None,
            }
        };
        Ok(Response::new(response))
    }

    async fn list_tasks(
        &self,
        request: Request<database::ListTasksRequest>,
    ) -> Result<Response<database::ListTasksResponse>, Status> {
        let req = request.into_inner();
        let user_id = if req.user_id.is_empty() {
            "everyone".to_string()
        } else {
            req.user_id
        };
        Ok(Response::new(database::ListTasksResponse {
            tasks: vec![database::Task {
                user_id,
                max_steps: req.limit,
                ..completed_task("T42")
            }],
            total: 250,
        }))
    }

    async fn get_task_history(
        &self,
        request: Request<database::GetTaskHistoryRequest>,
    ) -> Result<Response<database::GetTaskHistoryResponse>, Status> {
        let task_id = request.into_inner().task_id;
        match task_id.as_str() {
            "T42" => {
                let outputs = [2, 0, 1]
                    .into_iter()
                    .map(|step| database::TaskOutput {
                        task_id: task_id.clone(),
                        step_number: step,
                        output_type: "action".to_string(),
                        step_data: format!(r#"{{"step": {step}}}"#),
                        timestamp: 1_700_000_000 + step as i64,
                    })
                    .collect();
                Ok(Response::new(database::GetTaskHistoryResponse {
                    success: true,
                    outputs,
                }))
            }
            "boom" => Err(Status::internal("storage offline")),
            _ => Ok(Response::new(database::GetTaskHistoryResponse {
                success: false,
                outputs: Vec::new(),
            })),
        }
    }
}

async fn bind_local() -> (TcpListener, ServiceEndpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, ServiceEndpoint::new("127.0.0.1", port))
}

/// Start a fake Backend service and return its endpoint.
pub async fn spawn_fake_backend() -> ServiceEndpoint {
    let (listener, endpoint) = bind_local().await;
    tokio::spawn(async move {
        Server::builder()
            .add_service(BackendServiceServer::new(FakeBackend))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });
    endpoint
}

/// Start a fake Database service and return its endpoint.
pub async fn spawn_fake_database() -> ServiceEndpoint {
    let (listener, endpoint) = bind_local().await;
    tokio::spawn(async move {
        Server::builder()
            .add_service(DatabaseServiceServer::new(FakeDatabase))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });
    endpoint
}
