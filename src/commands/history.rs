use super::Command;
use crate::context::AppContext;
use crate::views::history::{
    HistoryOutcome, NEEDS_TASK_ID_MESSAGE, NOT_FOUND_MESSAGE, entry_body, entry_title,
    found_summary, header, load_history,
};
use async_trait::async_trait;
use std::error::Error;

pub struct HistoryCommand {
    pub task_id: Option<String>,
}

#[async_trait]
impl Command for HistoryCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<(), Box<dyn Error>> {
        let task_id = self.task_id.as_deref().unwrap_or_default();
        let outcome = load_history(ctx, task_id).await;
        if let HistoryOutcome::Error(error) = outcome {
            return Err(error.into());
        }
        for line in history_lines(&outcome) {
            println!("{line}");
        }
        Ok(())
    }
}

/// Plain-text rendering of a history outcome, every step expanded.
fn history_lines(outcome: &HistoryOutcome) -> Vec<String> {
    match outcome {
        HistoryOutcome::NeedsTaskId => vec![NEEDS_TASK_ID_MESSAGE.to_string()],
        HistoryOutcome::NotFound => vec![NOT_FOUND_MESSAGE.to_string()],
        HistoryOutcome::Error(error) => vec![error.clone()],
        HistoryOutcome::Found { task, outputs } => {
            let mut lines = vec![found_summary(outputs)];
            if let Some(task) = task {
                lines.push(header(task));
            }
            for output in outputs {
                lines.push(String::new());
                lines.push(entry_title(output));
                lines.extend(
                    entry_body(output)
                        .render_lines()
                        .into_iter()
                        .map(|line| format!("  {line}")),
                );
            }
            lines
        }
    }
}
