use super::Command;
use crate::context::AppContext;
use crate::display::{format_timestamp, print_columns, status_glyph, truncate_prompt};
use crate::task::Task;
use crate::views::list::{EMPTY_MESSAGE, ListOutcome, load};
use async_trait::async_trait;
use std::error::Error;

pub struct ListCommand {
    /// Empty lists every user's tasks
    pub user_id: String,
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<(), Box<dyn Error>> {
        match load(ctx, &self.user_id).await {
            ListOutcome::Loaded { tasks, total } => {
                print_columns(
                    &["TASK ID", "STATUS", "USER", "CREATED", "PROMPT"],
                    &task_rows(&tasks),
                );
                println!();
                println!("Total Tasks: {total}");
                Ok(())
            }
            ListOutcome::Empty => {
                println!("{EMPTY_MESSAGE}");
                Ok(())
            }
            ListOutcome::Error(error) => Err(error.into()),
        }
    }
}

fn task_rows(tasks: &[Task]) -> Vec<Vec<String>> {
    tasks
        .iter()
        .map(|task| {
            vec![
                task.task_id.clone(),
                format!("{} {}", status_glyph(task.status()), task.status.to_uppercase()),
                task.user_id.clone(),
                format_timestamp(task.created_at),
                truncate_prompt(&task.task_prompt),
            ]
        })
        .collect()
}
