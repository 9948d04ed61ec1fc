use crate::proto::{backend, database};

/// Smallest step budget the Backend accepts.
pub const MIN_MAX_STEPS: i32 = 1;
/// Largest step budget the Backend accepts.
pub const MAX_MAX_STEPS: i32 = 1000;
/// Step budget used when the user does not pick one.
pub const DEFAULT_MAX_STEPS: i32 = 100;
/// User id sent when the user leaves the field blank.
pub const DEFAULT_USER_ID: &str = "default";

/// Lifecycle states a task can report.
///
/// The Database service sends the status as a free-form string; anything that
/// does not parse into one of these variants is treated as unrecognized by the
/// callers of [`TaskStatus::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    /// Parse a status string case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "running" => Some(TaskStatus::Running),
            "completed" => Some(TaskStatus::Completed),
            "failed" => Some(TaskStatus::Failed),
            "cancelled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

/// A task as stored by the Database service.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub task_id: String,
    pub task_prompt: String,
    /// Raw status string; see [`Task::status`] for the parsed form
    pub status: String,
    pub max_steps: i32,
    pub user_id: String,
    /// Unix seconds, 0 when unknown
    pub created_at: i64,
    pub updated_at: i64,
    /// JSON document the task produced, once it has finished
    pub final_result: Option<String>,
}

impl Task {
    /// The parsed status, or `None` when the service sent an unrecognized value.
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::parse(&self.status)
    }

    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            task_id: "task-1".to_string(),
            task_prompt: "Open example.com and read the title".to_string(),
            status: "pending".to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            user_id: DEFAULT_USER_ID.to_string(),
            created_at: 0,
            updated_at: 0,
            final_result: None,
        }
    }
}

impl From<database::Task> for Task {
    fn from(task: database::Task) -> Self {
        Self {
            task_id: task.task_id,
            task_prompt: task.task_prompt,
            status: task.status,
            max_steps: task.max_steps,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
            final_result: non_empty(task.final_result),
        }
    }
}

/// One recorded step of a task, as stored by the Database service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskOutput {
    pub task_id: String,
    pub step_number: i32,
    pub output_type: String,
    /// Serialized step payload; usually JSON but not guaranteed
    pub step_data: String,
    pub timestamp: i64,
}

impl From<database::TaskOutput> for TaskOutput {
    fn from(output: database::TaskOutput) -> Self {
        Self {
            task_id: output.task_id,
            step_number: output.step_number,
            output_type: output.output_type,
            step_data: output.step_data,
            timestamp: output.timestamp,
        }
    }
}

/// Browsers the automation engine can drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserName {
    #[default]
    Firefox,
    Webkit,
    Chrome,
}

impl BrowserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserName::Firefox => "firefox",
            BrowserName::Webkit => "webkit",
            BrowserName::Chrome => "chrome",
        }
    }

    /// The following browser in selection order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            BrowserName::Firefox => BrowserName::Webkit,
            BrowserName::Webkit => BrowserName::Chrome,
            BrowserName::Chrome => BrowserName::Firefox,
        }
    }

    /// The preceding browser in selection order, wrapping around.
    pub fn previous(self) -> Self {
        match self {
            BrowserName::Firefox => BrowserName::Chrome,
            BrowserName::Webkit => BrowserName::Firefox,
            BrowserName::Chrome => BrowserName::Webkit,
        }
    }
}

/// Outbound request to launch a task.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTaskRequest {
    pub task_prompt: String,
    pub max_steps: i32,
    pub user_id: String,
    pub browser_name: BrowserName,
}

impl StartTaskRequest {
    /// Build a request, clamping the step budget and defaulting a blank user id.
    pub fn new(
        task_prompt: impl Into<String>,
        max_steps: i64,
        user_id: &str,
        browser_name: BrowserName,
    ) -> Self {
        let user_id = user_id.trim();
        Self {
            task_prompt: task_prompt.into(),
            max_steps: clamp_max_steps(max_steps),
            user_id: if user_id.is_empty() {
                DEFAULT_USER_ID.to_string()
            } else {
                user_id.to_string()
            },
            browser_name,
        }
    }
}

impl From<StartTaskRequest> for backend::StartTaskRequest {
    fn from(request: StartTaskRequest) -> Self {
        Self {
            task_prompt: request.task_prompt,
            max_steps: request.max_steps,
            user_id: request.user_id,
            browser_name: request.browser_name.as_str().to_string(),
        }
    }
}

/// Reply to a start-task call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StartTaskReply {
    pub success: bool,
    pub task_id: String,
    pub message: String,
}

impl From<backend::StartTaskResponse> for StartTaskReply {
    fn from(response: backend::StartTaskResponse) -> Self {
        Self {
            success: response.success,
            task_id: response.task_id,
            message: response.message,
        }
    }
}

/// First page of a task listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    /// Total number of matching tasks, which may exceed `tasks.len()`
    pub total: i32,
}

impl From<database::ListTasksResponse> for TaskPage {
    fn from(response: database::ListTasksResponse) -> Self {
        Self {
            tasks: response.tasks.into_iter().map(Task::from).collect(),
            total: response.total,
        }
    }
}

/// Step history of one task, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskHistory {
    pub success: bool,
    pub outputs: Vec<TaskOutput>,
}

impl From<database::GetTaskHistoryResponse> for TaskHistory {
    fn from(response: database::GetTaskHistoryResponse) -> Self {
        Self {
            success: response.success,
            outputs: response.outputs.into_iter().map(TaskOutput::from).collect(),
        }
    }
}

/// Clamp a requested step budget into the range the Backend accepts.
pub fn clamp_max_steps(requested: i64) -> i32 {
    requested.clamp(MIN_MAX_STEPS as i64, MAX_MAX_STEPS as i64) as i32
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(TaskStatus::parse("running"), Some(TaskStatus::Running));
        assert_eq!(TaskStatus::parse("COMPLETED"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse(" Cancelled "), Some(TaskStatus::Cancelled));
        assert_eq!(TaskStatus::parse("paused"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_task_from_proto_drops_empty_final_result() {
        let task = Task::from(database::Task {
            task_id: "T1".to_string(),
            status: "running".to_string(),
            final_result: String::new(),
            ..Default::default()
        });
        assert_eq!(task.final_result, None);
        assert_eq!(task.status(), Some(TaskStatus::Running));

        let task = Task::from(database::Task {
            task_id: "T2".to_string(),
            status: "completed".to_string(),
            final_result: r#"{"ok":true}"#.to_string(),
            ..Default::default()
        });
        assert_eq!(task.final_result.as_deref(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn test_start_task_request_clamps_and_defaults() {
        let request = StartTaskRequest::new("Book a flight", 5000, "  ", BrowserName::Chrome);
        assert_eq!(request.max_steps, MAX_MAX_STEPS);
        assert_eq!(request.user_id, DEFAULT_USER_ID);

        let request = StartTaskRequest::new("Book a flight", 0, "alice", BrowserName::Webkit);
        assert_eq!(request.max_steps, MIN_MAX_STEPS);
        assert_eq!(request.user_id, "alice");

        let wire: backend::StartTaskRequest = request.into();
        assert_eq!(wire.browser_name, "webkit");
        assert_eq!(wire.max_steps, 1);
    }

    #[test]
    fn test_browser_cycle_wraps() {
        let mut browser = BrowserName::default();
        assert_eq!(browser, BrowserName::Firefox);
        for _ in 0..3 {
            browser = browser.next();
        }
        assert_eq!(browser, BrowserName::Firefox);
        assert_eq!(BrowserName::Firefox.previous(), BrowserName::Chrome);
    }

    #[test]
    fn test_history_preserves_server_order() {
        let history = TaskHistory::from(database::GetTaskHistoryResponse {
            success: true,
            outputs: vec![
                database::TaskOutput {
                    step_number: 3,
                    ..Default::default()
                },
                database::TaskOutput {
                    step_number: 1,
                    ..Default::default()
                },
            ],
        });
        let steps: Vec<i32> = history.outputs.iter().map(|o| o.step_number).collect();
        assert_eq!(steps, vec![3, 1]);
    }
}
