/// Values carried between views for the lifetime of one console session.
///
/// Each field has a single writer: the Create Task view records the task it
/// just launched, and the Task List view records the task picked for drill-down,
/// which the Task History view reads to pre-fill its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Id returned by the most recent successful StartTask call
    pub last_created_task_id: Option<String>,
    /// Task chosen with "view history" in the Task List view
    pub selected_task_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a task for the History view.
    pub fn select_task(&mut self, task_id: impl Into<String>) {
        self.selected_task_id = Some(task_id.into());
    }

    /// Initial value of the History view's task id field.
    pub fn history_prefill(&self) -> String {
        self.selected_task_id.clone().unwrap_or_default()
    }
}
