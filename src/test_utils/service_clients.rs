use crate::context::backend_client::BackendClient;
use crate::context::database_client::DatabaseClient;
use crate::context::error::ClientError;
use crate::task::{StartTaskReply, StartTaskRequest, Task, TaskHistory, TaskPage};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

fn unavailable(message: &str) -> ClientError {
    ClientError::from(tonic::Status::unavailable(message.to_string()))
}

/// Backend fake that records every request and answers with a fixed reply.
///
/// Set `error` to make every call fail with an `Unavailable` status.
pub struct TrackedBackendClient {
    pub start_task_calls: Arc<Mutex<Vec<StartTaskRequest>>>,
    pub reply: StartTaskReply,
    pub error: Option<String>,
    pub reachable: bool,
}

impl Default for TrackedBackendClient {
    fn default() -> Self {
        Self {
            start_task_calls: Arc::new(Mutex::new(Vec::new())),
            reply: StartTaskReply {
                success: true,
                task_id: "T1".to_string(),
                message: "Task started".to_string(),
            },
            error: None,
            reachable: true,
        }
    }
}

impl TrackedBackendClient {
    pub fn start_task_call_count(&self) -> usize {
        self.start_task_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BackendClient for TrackedBackendClient {
    async fn start_task(&self, request: StartTaskRequest) -> Result<StartTaskReply, ClientError> {
        self.start_task_calls.lock().unwrap().push(request);
        match &self.error {
            Some(message) => Err(unavailable(message)),
            None => Ok(self.reply.clone()),
        }
    }

    async fn check_connection(&self) -> Result<(), ClientError> {
        if self.reachable {
            Ok(())
        } else {
            Err(unavailable("backend unreachable"))
        }
    }
}

/// Database fake with canned replies and per-method call logs.
pub struct TrackedDatabaseClient {
    pub list_tasks_calls: Arc<Mutex<Vec<(String, i32, i32)>>>,
    pub get_task_history_calls: Arc<Mutex<Vec<String>>>,
    pub get_task_calls: Arc<Mutex<Vec<String>>>,

    pub page: TaskPage,
    pub history: TaskHistory,
    pub task: Option<Task>,
    pub list_tasks_error: Option<String>,
    pub get_task_history_error: Option<String>,
    pub get_task_error: Option<String>,
    pub reachable: bool,
}

impl Default for TrackedDatabaseClient {
    fn default() -> Self {
        Self {
            list_tasks_calls: Arc::new(Mutex::new(Vec::new())),
            get_task_history_calls: Arc::new(Mutex::new(Vec::new())),
            get_task_calls: Arc::new(Mutex::new(Vec::new())),
            page: TaskPage::default(),
            history: TaskHistory::default(),
            task: None,
            list_tasks_error: None,
            get_task_history_error: None,
            get_task_error: None,
            reachable: true,
        }
    }
}

impl TrackedDatabaseClient {
    pub fn list_tasks_call_count(&self) -> usize {
        self.list_tasks_calls.lock().unwrap().len()
    }

    pub fn get_task_history_call_count(&self) -> usize {
        self.get_task_history_calls.lock().unwrap().len()
    }

    pub fn get_task_call_count(&self) -> usize {
        self.get_task_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DatabaseClient for TrackedDatabaseClient {
    async fn list_tasks(
        &self,
        user_id: &str,
        limit: i32,
        offset: i32,
    ) -> Result<TaskPage, ClientError> {
        self.list_tasks_calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), limit, offset));
        match &self.list_tasks_error {
            Some(message) => Err(unavailable(message)),
            None => Ok(self.page.clone()),
        }
    }

    async fn get_task_history(&self, task_id: &str) -> Result<TaskHistory, ClientError> {
        self.get_task_history_calls
            .lock()
            .unwrap()
            .push(task_id.to_string());
        match &self.get_task_history_error {
            Some(message) => Err(unavailable(message)),
            None => Ok(self.history.clone()),
        }
    }

    async fn get_task(&self, task_id: &str) -> Result<Option<Task>, ClientError> {
        self.get_task_calls.lock().unwrap().push(task_id.to_string());
        match &self.get_task_error {
            Some(message) => Err(unavailable(message)),
            None => Ok(self.task.clone()),
        }
    }

    async fn check_connection(&self) -> Result<(), ClientError> {
        if self.reachable {
            Ok(())
        } else {
            Err(unavailable("database unreachable"))
        }
    }
}
