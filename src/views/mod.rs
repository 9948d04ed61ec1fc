//! The three console views and the service status panel.
//!
//! Each view exposes one async action that performs its remote calls and
//! returns a typed outcome. Renderers (the TUI and the CLI commands) only read
//! outcomes, so no network I/O happens while drawing.

pub mod create;
pub mod history;
pub mod list;
pub mod status;

/// Which screen the console is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    CreateTask,
    TaskList,
    TaskHistory,
}

impl View {
    pub const ALL: [View; 3] = [View::CreateTask, View::TaskList, View::TaskHistory];

    pub fn title(&self) -> &'static str {
        match self {
            View::CreateTask => "Create Task",
            View::TaskList => "Task List",
            View::TaskHistory => "Task History",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::CreateTask => 0,
            View::TaskList => 1,
            View::TaskHistory => 2,
        }
    }
}
