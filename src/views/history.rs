use crate::context::AppContext;
use crate::display::{StepPayload, format_timestamp};
use crate::task::{Task, TaskOutput};
use tracing::{debug, warn};

pub const NEEDS_TASK_ID_MESSAGE: &str = "Enter a task ID to view its history";
pub const NOT_FOUND_MESSAGE: &str = "No history found for this task";

/// Result of loading the Task History view.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    /// The task id was blank; nothing was requested
    NeedsTaskId,
    Found {
        /// Task metadata, if GetTask succeeded
        task: Option<Task>,
        /// Step outputs in the order the service returned them
        outputs: Vec<TaskOutput>,
    },
    NotFound,
    Error(String),
}

/// Fetch the step outputs of a task, then the task itself for the header.
///
/// The two calls are sequential. A failed metadata lookup only drops the
/// header; the outputs are still shown.
pub async fn load_history(ctx: &AppContext, task_id: &str) -> HistoryOutcome {
    let task_id = task_id.trim();
    if task_id.is_empty() {
        return HistoryOutcome::NeedsTaskId;
    }

    let database = ctx.database_client();
    let history = match database.get_task_history(task_id).await {
        Ok(history) => history,
        Err(err) => return HistoryOutcome::Error(err.user_message("Error loading history")),
    };
    if !history.success || history.outputs.is_empty() {
        debug!(task_id, success = history.success, "no history for task");
        return HistoryOutcome::NotFound;
    }

    let task = match database.get_task(task_id).await {
        Ok(task) => task,
        Err(err) => {
            warn!(task_id, error = %err, "task metadata unavailable");
            None
        }
    };

    HistoryOutcome::Found {
        task,
        outputs: history.outputs,
    }
}

/// "Found 3 output(s)"
pub fn found_summary(outputs: &[TaskOutput]) -> String {
    format!("Found {} output(s)", outputs.len())
}

pub fn header(task: &Task) -> String {
    format!("Task: {} | Status: {}", task.task_prompt, task.status)
}

pub fn entry_title(output: &TaskOutput) -> String {
    format!(
        "Step {} - {} ({})",
        output.step_number,
        output.output_type,
        format_timestamp(output.timestamp)
    )
}

pub fn entry_body(output: &TaskOutput) -> StepPayload {
    StepPayload::parse(&output.step_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskHistory;
    use crate::test_utils::{TrackedBackendClient, TrackedDatabaseClient};
    use std::sync::Arc;

    fn context(database: Arc<TrackedDatabaseClient>) -> AppContext {
        AppContext::with_fakes(Arc::new(TrackedBackendClient::default()), database)
    }

    fn output(step_number: i32, step_data: &str) -> TaskOutput {
        TaskOutput {
            task_id: "T42".to_string(),
            step_number,
            output_type: "action".to_string(),
            step_data: step_data.to_string(),
            timestamp: 0,
        }
    }

    #[tokio::test]
    async fn test_blank_task_id_makes_no_call() {
        let database = Arc::new(TrackedDatabaseClient::default());
        let ctx = context(database.clone());

        assert_eq!(load_history(&ctx, "  ").await, HistoryOutcome::NeedsTaskId);
        assert_eq!(database.get_task_history_call_count(), 0);
        assert_eq!(database.get_task_call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_and_unsuccessful_history_are_both_not_found() {
        for success in [true, false] {
            let database = Arc::new(TrackedDatabaseClient {
                history: TaskHistory {
                    success,
                    outputs: Vec::new(),
                },
                ..TrackedDatabaseClient::default()
            });
            let ctx = context(database.clone());

            assert_eq!(load_history(&ctx, "T42").await, HistoryOutcome::NotFound);
            assert_eq!(database.get_task_call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_found_preserves_server_order_and_fetches_task() {
        let database = Arc::new(TrackedDatabaseClient {
            history: TaskHistory {
                success: true,
                outputs: vec![output(2, "{}"), output(0, "{}"), output(1, "{}")],
            },
            task: Some(Task {
                task_id: "T42".to_string(),
                task_prompt: "Book a flight".to_string(),
                status: "running".to_string(),
                ..Task::test_default()
            }),
            ..TrackedDatabaseClient::default()
        });
        let ctx = context(database.clone());

        match load_history(&ctx, " T42 ").await {
            HistoryOutcome::Found { task, outputs } => {
                let steps: Vec<i32> = outputs.iter().map(|o| o.step_number).collect();
                assert_eq!(steps, vec![2, 0, 1]);
                assert_eq!(found_summary(&outputs), "Found 3 output(s)");
                let task = task.unwrap();
                assert_eq!(header(&task), "Task: Book a flight | Status: running");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(database.get_task_history_calls.lock().unwrap()[0], "T42");
        assert_eq!(database.get_task_calls.lock().unwrap()[0], "T42");
    }

    #[tokio::test]
    async fn test_task_lookup_failure_keeps_outputs() {
        let database = Arc::new(TrackedDatabaseClient {
            history: TaskHistory {
                success: true,
                outputs: vec![output(0, "{}")],
            },
            get_task_error: Some("timeout".to_string()),
            ..TrackedDatabaseClient::default()
        });
        let ctx = context(database);

        match load_history(&ctx, "T42").await {
            HistoryOutcome::Found { task, outputs } => {
                assert_eq!(task, None);
                assert_eq!(outputs.len(), 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_history_call_error() {
        let database = Arc::new(TrackedDatabaseClient {
            get_task_history_error: Some("connection refused".to_string()),
            ..TrackedDatabaseClient::default()
        });
        let ctx = context(database);

        assert_eq!(
            load_history(&ctx, "T42").await,
            HistoryOutcome::Error(
                "gRPC Error: Unavailable - connection refused".to_string()
            )
        );
    }

    #[test]
    fn test_entry_rendering() {
        let step = TaskOutput {
            output_type: "screenshot".to_string(),
            ..output(3, "not json")
        };
        assert_eq!(entry_title(&step), "Step 3 - screenshot (N/A)");
        assert_eq!(entry_body(&step), StepPayload::Raw("not json".to_string()));
    }
}
