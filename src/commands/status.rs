use super::Command;
use crate::context::AppContext;
use crate::views::status::check_services;
use async_trait::async_trait;
use std::error::Error;

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<(), Box<dyn Error>> {
        let config = ctx.service_config();
        println!("Backend Service:  {}", config.backend);
        println!("Database Service: {}", config.database);
        println!();

        let status = check_services(ctx).await;
        println!("{status}");
        if status.has_error() {
            return Err("one or more services are unreachable".into());
        }
        Ok(())
    }
}
