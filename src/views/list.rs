use crate::context::AppContext;
use crate::display::{StepPayload, format_timestamp, status_glyph, truncate_prompt};
use crate::task::Task;
use tracing::debug;

/// Tasks requested per listing. Only the first page is ever fetched.
pub const PAGE_SIZE: i32 = 100;

pub const EMPTY_MESSAGE: &str = "No tasks found. Create a new task to get started!";

/// Result of loading the Task List view.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    Loaded { tasks: Vec<Task>, total: i32 },
    /// The service returned no tasks; not an error
    Empty,
    Error(String),
}

/// Fetch the first page of tasks, optionally filtered by user id.
///
/// A blank filter lists every user's tasks.
pub async fn load(ctx: &AppContext, user_filter: &str) -> ListOutcome {
    let user_filter = user_filter.trim();
    match ctx
        .database_client()
        .list_tasks(user_filter, PAGE_SIZE, 0)
        .await
    {
        Ok(page) if page.tasks.is_empty() => ListOutcome::Empty,
        Ok(page) => {
            debug!(shown = page.tasks.len(), total = page.total, "tasks loaded");
            ListOutcome::Loaded {
                tasks: page.tasks,
                total: page.total,
            }
        }
        Err(err) => ListOutcome::Error(err.user_message("Error loading tasks")),
    }
}

/// Collapsed title of a task entry: glyph, truncated prompt and status.
pub fn entry_title(task: &Task) -> String {
    format!(
        "{} {} | Status: {}",
        status_glyph(task.status()),
        truncate_prompt(&task.task_prompt),
        task.status.to_uppercase()
    )
}

/// Label/value pairs shown when a task entry is expanded.
pub fn entry_details(task: &Task) -> Vec<(&'static str, String)> {
    vec![
        ("Task ID", task.task_id.clone()),
        ("Status", task.status.clone()),
        ("Max Steps", task.max_steps.to_string()),
        ("User ID", task.user_id.clone()),
        ("Created", format_timestamp(task.created_at)),
        ("Updated", format_timestamp(task.updated_at)),
    ]
}

/// The task's final result, when the service sent one.
pub fn final_result(task: &Task) -> Option<StepPayload> {
    task.final_result.as_deref().map(StepPayload::parse)
}
