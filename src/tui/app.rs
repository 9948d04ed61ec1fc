use crate::session::Session;
use crate::task::{MAX_MAX_STEPS, MIN_MAX_STEPS, Task};
use crate::views::View;
use crate::views::create::{CreateOutcome, CreateTaskForm};
use crate::views::history::HistoryOutcome;
use crate::views::list::ListOutcome;
use crate::views::status::ServiceStatus;
use ratatui::widgets::ListState;
use std::collections::HashSet;

use super::events::Action;

/// Input field with focus in the Create Task form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateField {
    #[default]
    Prompt,
    MaxSteps,
    Browser,
    UserId,
}

impl CreateField {
    pub fn next(self) -> Self {
        match self {
            CreateField::Prompt => CreateField::MaxSteps,
            CreateField::MaxSteps => CreateField::Browser,
            CreateField::Browser => CreateField::UserId,
            CreateField::UserId => CreateField::Prompt,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            CreateField::Prompt => CreateField::UserId,
            CreateField::MaxSteps => CreateField::Prompt,
            CreateField::Browser => CreateField::MaxSteps,
            CreateField::UserId => CreateField::Browser,
        }
    }
}

/// Which part of the List or History view receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Input,
    Entries,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Input => Pane::Entries,
            Pane::Entries => Pane::Input,
        }
    }
}

/// State of a list of collapsible entries.
#[derive(Debug, Default)]
pub struct EntryList {
    pub state: ListState,
    pub expanded: HashSet<usize>,
}

impl EntryList {
    /// Forget the selection and expansion after the entries were replaced.
    pub fn reset(&mut self, len: usize) {
        self.expanded.clear();
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        self.state.select(Some((current + 1).min(len - 1)));
    }

    pub fn select_previous(&mut self) {
        if let Some(current) = self.state.selected() {
            self.state.select(Some(current.saturating_sub(1)));
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.state.selected()
            && !self.expanded.remove(&index)
        {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}

/// Application state for the interactive console.
///
/// Holds the inputs and last outcome of every view, so switching views keeps
/// what the user typed. Outcomes are replaced only by the run loop after it
/// performs an [`Action`].
pub struct TuiApp {
    pub view: View,
    pub session: Session,
    /// Whether the application should exit
    pub should_quit: bool,
    /// Set while the run loop awaits a remote call
    pub busy: bool,

    pub create_form: CreateTaskForm,
    pub create_field: CreateField,
    /// Set when Backspace emptied the step budget; the next digit replaces it
    max_steps_cleared: bool,
    pub create_outcome: Option<CreateOutcome>,

    pub list_filter: String,
    pub list_pane: Pane,
    pub list_outcome: Option<ListOutcome>,
    pub list_entries: EntryList,

    pub history_task_id: String,
    pub history_pane: Pane,
    pub history_outcome: Option<HistoryOutcome>,
    pub history_entries: EntryList,

    pub service_status: ServiceStatus,
    /// "host:port" of the Backend and Database services, for the sidebar
    pub endpoints: (String, String),
}

impl TuiApp {
    pub fn new(backend_endpoint: String, database_endpoint: String) -> Self {
        Self {
            view: View::default(),
            session: Session::new(),
            should_quit: false,
            busy: false,
            create_form: CreateTaskForm::default(),
            create_field: CreateField::default(),
            max_steps_cleared: false,
            create_outcome: None,
            list_filter: String::new(),
            list_pane: Pane::default(),
            list_outcome: None,
            list_entries: EntryList::default(),
            history_task_id: String::new(),
            history_pane: Pane::default(),
            history_outcome: None,
            history_entries: EntryList::default(),
            service_status: ServiceStatus::default(),
            endpoints: (backend_endpoint, database_endpoint),
        }
    }

    /// Show `view`, returning the load it needs, if any.
    ///
    /// The Task List always reloads. The Task History view falls back to the
    /// session's selected task when its input is empty, and loads only when
    /// the id is not blank.
    pub fn switch_view(&mut self, view: View) -> Option<Action> {
        self.view = view;
        match view {
            View::CreateTask => None,
            View::TaskList => Some(Action::RefreshList),
            View::TaskHistory => {
                if self.history_task_id.is_empty() {
                    self.history_task_id = self.session.history_prefill();
                }
                if self.history_task_id.trim().is_empty() {
                    None
                } else {
                    Some(Action::LoadHistory)
                }
            }
        }
    }

    /// Tasks currently shown in the Task List view
    pub fn listed_tasks(&self) -> &[Task] {
        match &self.list_outcome {
            Some(ListOutcome::Loaded { tasks, .. }) => tasks,
            _ => &[],
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list_entries
            .state
            .selected()
            .and_then(|index| self.listed_tasks().get(index))
    }

    pub fn history_len(&self) -> usize {
        match &self.history_outcome {
            Some(HistoryOutcome::Found { outputs, .. }) => outputs.len(),
            _ => 0,
        }
    }

    /// Drill down from the selected task into its history.
    pub fn view_selected_history(&mut self) -> Option<Action> {
        let task_id = self.selected_task()?.task_id.clone();
        self.session.select_task(task_id);
        self.history_task_id = self.session.history_prefill();
        self.switch_view(View::TaskHistory)
    }

    pub fn set_create_outcome(&mut self, outcome: CreateOutcome) {
        if !outcome.is_error() {
            self.service_status.backend.record(None);
        }
        self.create_outcome = Some(outcome);
    }

    /// Store a list result and note what it says about the Database service.
    pub fn set_list_outcome(&mut self, outcome: ListOutcome) {
        let error = match &outcome {
            ListOutcome::Error(error) => Some(error.as_str()),
            _ => None,
        };
        self.service_status.database.record(error);
        self.list_outcome = Some(outcome);
        let len = self.listed_tasks().len();
        self.list_entries.reset(len);
    }

    pub fn set_history_outcome(&mut self, outcome: HistoryOutcome) {
        match &outcome {
            HistoryOutcome::NeedsTaskId => {}
            HistoryOutcome::Error(error) => {
                self.service_status.database.record(Some(error.as_str()))
            }
            _ => self.service_status.database.record(None),
        }
        self.history_outcome = Some(outcome);
        let len = self.history_len();
        self.history_entries.reset(len);
    }

    /// Append a typed digit to the step budget, capped at the largest budget.
    pub fn push_max_steps_digit(&mut self, digit: u32) {
        let digit = digit as i64;
        let value = if self.max_steps_cleared {
            digit
        } else {
            self.create_form.max_steps.saturating_mul(10).saturating_add(digit)
        };
        self.max_steps_cleared = value < MIN_MAX_STEPS as i64;
        self.create_form.max_steps = clamp_steps(value);
    }

    /// Drop the last digit. Removing the only digit leaves the smallest budget
    /// in place until the next digit replaces it.
    pub fn pop_max_steps_digit(&mut self) {
        let value = self.create_form.max_steps / 10;
        self.max_steps_cleared = value < MIN_MAX_STEPS as i64;
        self.create_form.max_steps = clamp_steps(value);
    }

    /// Step the budget by `delta`, staying inside the accepted range.
    pub fn adjust_max_steps(&mut self, delta: i64) {
        self.max_steps_cleared = false;
        self.create_form.max_steps = clamp_steps(self.create_form.max_steps.saturating_add(delta));
    }
}

fn clamp_steps(value: i64) -> i64 {
    value.clamp(MIN_MAX_STEPS as i64, MAX_MAX_STEPS as i64)
}
