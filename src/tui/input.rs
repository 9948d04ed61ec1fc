use super::app::{CreateField, Pane, TuiApp};
use super::events::Action;
use crate::views::View;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handle a crossterm event, updating TUI application state accordingly.
///
/// Global keys switch views (F1-F3), check services (F5) and quit (Esc or
/// Ctrl+C). Everything else goes to the active view. Returns the remote
/// action the event asks for, if any.
pub fn handle_event(app: &mut TuiApp, event: &Event) -> Option<Action> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_quit_key(key) {
        app.should_quit = true;
        return None;
    }

    match key.code {
        KeyCode::F(1) => app.switch_view(View::CreateTask),
        KeyCode::F(2) => app.switch_view(View::TaskList),
        KeyCode::F(3) => app.switch_view(View::TaskHistory),
        KeyCode::F(5) => Some(Action::CheckServices),
        _ => match app.view {
            View::CreateTask => handle_create_key(app, key),
            View::TaskList => handle_list_key(app, key),
            View::TaskHistory => handle_history_key(app, key),
        },
    }
}

/// Handle an event that arrives while a remote call is in flight.
///
/// Only the quit keys are honored. Everything else is dropped so that keys
/// pressed during a slow call cannot queue another one.
pub fn handle_busy_event(app: &mut TuiApp, event: &Event) {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
        && is_quit_key(key)
    {
        app.should_quit = true;
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn handle_create_key(app: &mut TuiApp, key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return Some(Action::SubmitCreate),
        KeyCode::Tab => app.create_field = app.create_field.next(),
        KeyCode::BackTab => app.create_field = app.create_field.previous(),
        _ => match app.create_field {
            CreateField::Prompt => edit_text(&mut app.create_form.task_prompt, key.code),
            CreateField::UserId => edit_text(&mut app.create_form.user_id, key.code),
            CreateField::MaxSteps => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(digit) = c.to_digit(10) {
                        app.push_max_steps_digit(digit);
                    }
                }
                KeyCode::Backspace => app.pop_max_steps_digit(),
                KeyCode::Up => app.adjust_max_steps(1),
                KeyCode::Down => app.adjust_max_steps(-1),
                _ => {}
            },
            CreateField::Browser => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    app.create_form.browser_name = app.create_form.browser_name.next();
                }
                KeyCode::Left => {
                    app.create_form.browser_name = app.create_form.browser_name.previous();
                }
                _ => {}
            },
        },
    }
    None
}

fn handle_list_key(app: &mut TuiApp, key: &KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.list_pane = app.list_pane.toggle();
        return None;
    }

    match app.list_pane {
        Pane::Input => match key.code {
            KeyCode::Enter => return Some(Action::RefreshList),
            KeyCode::Down => app.list_pane = Pane::Entries,
            code => edit_text(&mut app.list_filter, code),
        },
        Pane::Entries => {
            let len = app.listed_tasks().len();
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => app.list_entries.select_next(len),
                KeyCode::Up | KeyCode::Char('k') => app.list_entries.select_previous(),
                KeyCode::Enter | KeyCode::Char(' ') => app.list_entries.toggle_selected(),
                KeyCode::Char('h') => return app.view_selected_history(),
                KeyCode::Char('r') => return Some(Action::RefreshList),
                KeyCode::Char('s') => return Some(Action::CheckServices),
                _ => {}
            }
        }
    }
    None
}

fn handle_history_key(app: &mut TuiApp, key: &KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.history_pane = app.history_pane.toggle();
        return None;
    }

    match app.history_pane {
        Pane::Input => match key.code {
            KeyCode::Enter => return Some(Action::LoadHistory),
            KeyCode::Down => app.history_pane = Pane::Entries,
            code => edit_text(&mut app.history_task_id, code),
        },
        Pane::Entries => {
            let len = app.history_len();
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => app.history_entries.select_next(len),
                KeyCode::Up | KeyCode::Char('k') => app.history_entries.select_previous(),
                KeyCode::Enter | KeyCode::Char(' ') => app.history_entries.toggle_selected(),
                KeyCode::Char('r') => return Some(Action::LoadHistory),
                KeyCode::Char('s') => return Some(Action::CheckServices),
                _ => {}
            }
        }
    }
    None
}

fn edit_text(field: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => field.push(c),
        KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
}
