use crate::context::AppContext;
use crate::session::Session;
use crate::tui::app::TuiApp;
use crate::tui::events::Action;
use crate::tui::input::{handle_busy_event, handle_event};
use crate::tui::ui::render;
use crate::views::create::{self, CreateOutcome, CreateTaskForm};
use crate::views::history::{self, HistoryOutcome};
use crate::views::list::{self, ListOutcome};
use crate::views::status::{self, ServiceStatus};
use crossterm::event::Event;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::future::Future;
use std::io::Stdout;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Guard that restores terminal state on drop, ensuring cleanup even on panic.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the interactive console until the user quits.
///
/// Input is read on a dedicated thread and forwarded over a channel. While an
/// action's remote call is in flight the loop keeps draining that channel:
/// quit keys cancel the call, every other key is dropped.
pub async fn run_tui(ctx: AppContext) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut guard = TerminalGuard { terminal };
    let config = ctx.service_config();
    let mut app = TuiApp::new(config.backend.to_string(), config.database.to_string());

    let (input_tx, mut input_rx) = tokio::sync::mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            // Poll with 50ms timeout so the thread notices a closed channel
            if crossterm::event::poll(std::time::Duration::from_millis(50)).unwrap_or(false)
                && let Ok(event) = crossterm::event::read()
                && input_tx.send(event).is_err()
            {
                break;
            }
        }
    });

    info!(backend = %config.backend, database = %config.database, "console started");

    loop {
        guard.terminal.draw(|frame| {
            render(&mut app, frame);
        })?;

        if app.should_quit {
            break;
        }

        let Some(event) = input_rx.recv().await else {
            break;
        };
        let Some(action) = handle_event(&mut app, &event) else {
            continue;
        };

        debug!(?action, "performing action");
        app.busy = true;
        guard.terminal.draw(|frame| {
            render(&mut app, frame);
        })?;

        let job = Job::for_action(&app, action);
        let completion = wait_for(&mut app, &mut input_rx, job.run(&ctx)).await;
        app.busy = false;
        match completion {
            Some(completion) => apply(&mut app, completion),
            None => info!(?action, "quit while a request was in flight"),
        }
    }

    // Guard's Drop handles terminal cleanup
    Ok(())
}

/// Inputs of an action, copied out of the app so the call does not hold it.
enum Job {
    Create {
        form: CreateTaskForm,
        session: Session,
    },
    List {
        filter: String,
    },
    History {
        task_id: String,
    },
    CheckServices,
}

/// What a finished [`Job`] hands back to the app.
enum Completion {
    Created {
        outcome: CreateOutcome,
        session: Session,
    },
    Listed(ListOutcome),
    History(HistoryOutcome),
    Services(ServiceStatus),
}

impl Job {
    fn for_action(app: &TuiApp, action: Action) -> Self {
        match action {
            Action::SubmitCreate => Job::Create {
                form: app.create_form.clone(),
                session: app.session.clone(),
            },
            Action::RefreshList => Job::List {
                filter: app.list_filter.clone(),
            },
            Action::LoadHistory => Job::History {
                task_id: app.history_task_id.clone(),
            },
            Action::CheckServices => Job::CheckServices,
        }
    }

    async fn run(self, ctx: &AppContext) -> Completion {
        match self {
            Job::Create { form, mut session } => {
                let outcome = create::submit(ctx, &form, &mut session).await;
                Completion::Created { outcome, session }
            }
            Job::List { filter } => Completion::Listed(list::load(ctx, &filter).await),
            Job::History { task_id } => {
                Completion::History(history::load_history(ctx, &task_id).await)
            }
            Job::CheckServices => Completion::Services(status::check_services(ctx).await),
        }
    }
}

/// Await `work` while still reading input.
///
/// Returns `None` when a quit key arrives first; `work` is dropped, which
/// cancels its call. Other events are discarded.
async fn wait_for<F>(
    app: &mut TuiApp,
    input_rx: &mut UnboundedReceiver<Event>,
    work: F,
) -> Option<Completion>
where
    F: Future<Output = Completion>,
{
    tokio::pin!(work);
    loop {
        tokio::select! {
            biased;
            Some(event) = input_rx.recv() => {
                handle_busy_event(app, &event);
                if app.should_quit {
                    return None;
                }
            }
            completion = &mut work => return Some(completion),
        }
    }
}

fn apply(app: &mut TuiApp, completion: Completion) {
    match completion {
        Completion::Created { outcome, session } => {
            app.session = session;
            app.set_create_outcome(outcome);
        }
        Completion::Listed(outcome) => app.set_list_outcome(outcome),
        Completion::History(outcome) => app.set_history_outcome(outcome),
        Completion::Services(service_status) => app.service_status = service_status,
    }
}
