/// Remote work requested by input handling.
///
/// Key handlers only mutate local state. Anything that talks to a service is
/// returned as an action and performed by the run loop. Only one action runs at
/// a time; keys other than quit are dropped until it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Validate the Create Task form and call StartTask
    SubmitCreate,
    /// ListTasks with the current user filter
    RefreshList,
    /// GetTaskHistory (then GetTask) for the entered task id
    LoadHistory,
    /// Eagerly connect to both services
    CheckServices,
}
