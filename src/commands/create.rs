use super::Command;
use crate::context::AppContext;
use crate::session::Session;
use crate::task::BrowserName;
use crate::views::create::{CreateOutcome, CreateTaskForm, submit};
use async_trait::async_trait;
use std::error::Error;

pub struct CreateCommand {
    pub prompt: String,
    pub max_steps: i64,
    pub browser: BrowserName,
    pub user_id: String,
}

#[async_trait]
impl Command for CreateCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<(), Box<dyn Error>> {
        let form = CreateTaskForm {
            task_prompt: self.prompt.clone(),
            max_steps: self.max_steps,
            browser_name: self.browser,
            user_id: self.user_id.clone(),
        };

        match submit(ctx, &form, &mut Session::new()).await {
            CreateOutcome::Started { task_id, message } => {
                println!("Task started successfully! Task ID: {task_id}");
                if !message.is_empty() {
                    println!("{message}");
                }
                Ok(())
            }
            CreateOutcome::Invalid(error) | CreateOutcome::Failed(error) => Err(error.into()),
        }
    }
}
