use crate::context::AppContext;
use crate::session::Session;
use crate::task::{BrowserName, DEFAULT_MAX_STEPS, DEFAULT_USER_ID, StartTaskRequest};
use tracing::{info, warn};

pub const EMPTY_PROMPT_ERROR: &str = "Please enter a task prompt";

/// Values entered in the Create Task form.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskForm {
    pub task_prompt: String,
    /// Unclamped; clamped into range when the request is built
    pub max_steps: i64,
    pub browser_name: BrowserName,
    pub user_id: String,
}

impl Default for CreateTaskForm {
    fn default() -> Self {
        Self {
            task_prompt: String::new(),
            max_steps: DEFAULT_MAX_STEPS as i64,
            browser_name: BrowserName::default(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl CreateTaskForm {
    /// Turn the form into a request, rejecting a blank prompt.
    pub fn validate(&self) -> Result<StartTaskRequest, &'static str> {
        if self.task_prompt.trim().is_empty() {
            return Err(EMPTY_PROMPT_ERROR);
        }
        Ok(StartTaskRequest::new(
            self.task_prompt.clone(),
            self.max_steps,
            &self.user_id,
            self.browser_name,
        ))
    }
}

/// Result of submitting the Create Task form.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Rejected locally; no remote call was made
    Invalid(String),
    Started { task_id: String, message: String },
    /// The Backend refused the task or the call itself failed
    Failed(String),
}

impl CreateOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, CreateOutcome::Started { .. })
    }
}

/// Validate the form and, if it passes, ask the Backend to start the task.
///
/// On success the new task id is stored in `session`.
pub async fn submit(
    ctx: &AppContext,
    form: &CreateTaskForm,
    session: &mut Session,
) -> CreateOutcome {
    let request = match form.validate() {
        Ok(request) => request,
        Err(message) => return CreateOutcome::Invalid(message.to_string()),
    };

    match ctx.backend_client().start_task(request).await {
        Ok(reply) if reply.success => {
            info!(task_id = %reply.task_id, "task started");
            session.last_created_task_id = Some(reply.task_id.clone());
            CreateOutcome::Started {
                task_id: reply.task_id,
                message: reply.message,
            }
        }
        Ok(reply) => {
            warn!(message = %reply.message, "backend refused task");
            CreateOutcome::Failed(format!("Failed to start task: {}", reply.message))
        }
        Err(err) => CreateOutcome::Failed(err.to_string()),
    }
}
