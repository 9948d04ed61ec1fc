use adia_console::commands::{Command, CreateCommand, HistoryCommand, ListCommand, StatusCommand};
use adia_console::context::AppContext;
use adia_console::context::service_config::{
    BACKEND_HOST_ENV, BACKEND_PORT_ENV, DATABASE_HOST_ENV, DATABASE_PORT_ENV,
    DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, DEFAULT_DATABASE_HOST, DEFAULT_DATABASE_PORT,
    ServiceConfig, ServiceEndpoint,
};
use adia_console::logging::{DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV, default_log_file, init_tracing};
use adia_console::task::{BrowserName, DEFAULT_MAX_STEPS, DEFAULT_USER_ID};
use adia_console::tui::run_tui;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "adia")]
#[command(
    author,
    version,
    about = "Adia - console for creating and inspecting browser automation tasks",
    long_about = None
)]
struct Cli {
    /// Backend service host
    #[arg(long, global = true, env = BACKEND_HOST_ENV, default_value = DEFAULT_BACKEND_HOST)]
    backend_host: String,

    /// Backend service port
    #[arg(long, global = true, env = BACKEND_PORT_ENV, default_value_t = DEFAULT_BACKEND_PORT)]
    backend_port: u16,

    /// Database service host
    #[arg(long, global = true, env = DATABASE_HOST_ENV, default_value = DEFAULT_DATABASE_HOST)]
    database_host: String,

    /// Database service port
    #[arg(long, global = true, env = DATABASE_PORT_ENV, default_value_t = DEFAULT_DATABASE_PORT)]
    database_port: u16,

    /// Log filter, e.g. "debug" or "adia_console=trace"
    #[arg(long, global = true, env = LOG_LEVEL_ENV, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Write logs to this file instead of stderr (the TUI defaults to adia.log in the temp dir)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Tui,
    /// Start a new browser automation task
    Create {
        /// What the browser agent should do
        #[arg(short, long)]
        prompt: String,

        /// Step budget, clamped to 1..=1000
        #[arg(
            short,
            long,
            allow_negative_numbers = true,
            default_value_t = DEFAULT_MAX_STEPS as i64
        )]
        max_steps: i64,

        /// Browser engine to run the task in
        #[arg(short, long, value_enum, default_value_t = BrowserName::Firefox)]
        browser: BrowserName,

        /// User the task is created for
        #[arg(short, long, default_value = DEFAULT_USER_ID)]
        user_id: String,
    },
    /// List the first 100 tasks
    List {
        /// Only show tasks of this user
        #[arg(short, long, default_value = "")]
        user_id: String,
    },
    /// Show the step outputs of a task
    History {
        /// Task to inspect
        task_id: Option<String>,
    },
    /// Check that both services are reachable
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let log_file = match (&command, cli.log_file) {
        (Commands::Tui, None) => Some(default_log_file()),
        (_, log_file) => log_file,
    };
    init_tracing(&cli.log_level, log_file.as_deref())?;

    let service_config = ServiceConfig {
        backend: ServiceEndpoint::new(cli.backend_host, cli.backend_port),
        database: ServiceEndpoint::new(cli.database_host, cli.database_port),
    };
    let ctx = AppContext::builder()
        .with_service_config(service_config)
        .build()
        .context("invalid service configuration")?;

    let command: Box<dyn Command> = match command {
        Commands::Tui => return run_tui(ctx).await,
        Commands::Create {
            prompt,
            max_steps,
            browser,
            user_id,
        } => Box::new(CreateCommand {
            prompt,
            max_steps,
            browser,
            user_id,
        }),
        Commands::List { user_id } => Box::new(ListCommand { user_id }),
        Commands::History { task_id } => Box::new(HistoryCommand { task_id }),
        Commands::Status => Box::new(StatusCommand),
    };

    if let Err(e) = command.execute(&ctx).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
