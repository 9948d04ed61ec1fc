use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::display::StepPayload;
use crate::task::TaskStatus;
use crate::views::View;
use crate::views::create::CreateOutcome;
use crate::views::history::{self, HistoryOutcome, NEEDS_TASK_ID_MESSAGE, NOT_FOUND_MESSAGE};
use crate::views::list::{self, EMPTY_MESSAGE, ListOutcome};
use crate::views::status::ServiceHealth;

use super::app::{CreateField, Pane, TuiApp};

const SIDEBAR_WIDTH: u16 = 30;

/// Render the console to the terminal frame.
///
/// Draws a header with the active view, a sidebar with navigation and service
/// status, the active view, and a footer with key binding hints.
pub fn render(app: &mut TuiApp, frame: &mut Frame) {
    let area = frame.area();

    let outer = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(app, frame, outer[0]);

    let panels =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).split(outer[1]);
    render_sidebar(app, frame, panels[0]);
    match app.view {
        View::CreateTask => render_create(app, frame, panels[1]),
        View::TaskList => render_list(app, frame, panels[1]),
        View::TaskHistory => render_history(app, frame, panels[1]),
    }

    render_footer(app, frame, outer[2]);
}

fn render_header(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::raw("Adia Console"),
        Span::raw(" \u{2502} "),
        Span::styled(app.view.title(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(task_id) = &app.session.last_created_task_id {
        spans.push(Span::raw(" \u{2502} "));
        spans.push(Span::styled(
            format!("Last created: {task_id}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.busy {
        spans.push(Span::raw(" \u{2502} "));
        spans.push(Span::styled("Loading...", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_sidebar(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = View::ALL
        .iter()
        .map(|view| {
            let label = format!(" F{} {}", view.index() + 1, view.title());
            if *view == app.view {
                Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(label)
            }
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Service Status",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let services = [
        ("Backend", &app.endpoints.0, &app.service_status.backend),
        ("Database", &app.endpoints.1, &app.service_status.database),
    ];
    for (name, endpoint, health) in services {
        lines.push(Line::from(format!(" {name}: {endpoint}")));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(health.label(), Style::default().fg(health_color(health))),
        ]));
    }

    let block = Block::default().title(" Adia ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_create(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(area);

    let form = &app.create_form;
    let fields = [
        (CreateField::Prompt, " Task Prompt ", form.task_prompt.clone()),
        (CreateField::MaxSteps, " Max Steps ", form.max_steps.to_string()),
        (
            CreateField::Browser,
            " Browser ",
            format!("\u{25c2} {} \u{25b8}", form.browser_name.as_str()),
        ),
        (CreateField::UserId, " User ID ", form.user_id.clone()),
    ];
    for (row, (field, title, value)) in rows.iter().zip(fields) {
        let block = input_block(title, app.create_field == field);
        frame.render_widget(
            Paragraph::new(value)
                .block(block)
                .wrap(Wrap { trim: false }),
            *row,
        );
    }

    let message = match &app.create_outcome {
        None => Text::from(Span::styled(
            "Press Enter to start the task",
            Style::default().fg(Color::DarkGray),
        )),
        Some(CreateOutcome::Started { task_id, message }) => Text::from(vec![
            Line::from(Span::styled(
                format!("Task started successfully! Task ID: {task_id}"),
                Style::default().fg(Color::Green),
            )),
            Line::from(message.as_str()),
        ]),
        Some(CreateOutcome::Invalid(error)) | Some(CreateOutcome::Failed(error)) => {
            Text::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
        }
    };
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: false }), rows[4]);
}

fn render_list(app: &mut TuiApp, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let filter = Paragraph::new(app.list_filter.as_str()).block(input_block(
        " Filter by User ID ",
        app.list_pane == Pane::Input,
    ));
    frame.render_widget(filter, rows[0]);

    let entries_block = entries_block(" Tasks ", app.list_pane == Pane::Entries);
    match &app.list_outcome {
        None => {}
        Some(ListOutcome::Empty) => {
            frame.render_widget(Paragraph::new(EMPTY_MESSAGE), rows[1]);
        }
        Some(ListOutcome::Error(error)) => {
            frame.render_widget(error_banner(error), rows[1]);
        }
        Some(ListOutcome::Loaded { tasks, total }) => {
            frame.render_widget(Paragraph::new(format!("Total Tasks: {total}")), rows[1]);

            let items: Vec<ListItem> = tasks
                .iter()
                .enumerate()
                .map(|(index, task)| {
                    let color = status_color(task.status());
                    let mut lines = vec![Line::from(Span::styled(
                        list::entry_title(task),
                        Style::default().fg(color),
                    ))];
                    if app.list_entries.is_expanded(index) {
                        for (label, value) in list::entry_details(task) {
                            lines.push(Line::from(vec![
                                Span::styled(
                                    format!("   {label}: "),
                                    Style::default().fg(Color::DarkGray),
                                ),
                                Span::raw(value),
                            ]));
                        }
                        if let Some(result) = list::final_result(task) {
                            lines.push(Line::from(Span::styled(
                                "   Final Result:",
                                Style::default().fg(Color::DarkGray),
                            )));
                            lines.extend(payload_lines(&result));
                        }
                    }
                    ListItem::new(Text::from(lines))
                })
                .collect();

            let list = List::new(items)
                .block(entries_block)
                .highlight_style(highlight_style());
            frame.render_stateful_widget(list, rows[2], &mut app.list_entries.state);
        }
    }
}

fn render_history(app: &mut TuiApp, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .split(area);

    let input = Paragraph::new(app.history_task_id.as_str())
        .block(input_block(" Task ID ", app.history_pane == Pane::Input));
    frame.render_widget(input, rows[0]);

    let entries_block = entries_block(" Steps ", app.history_pane == Pane::Entries);
    match &app.history_outcome {
        None | Some(HistoryOutcome::NeedsTaskId) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    NEEDS_TASK_ID_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )),
                rows[1],
            );
        }
        Some(HistoryOutcome::NotFound) => {
            frame.render_widget(Paragraph::new(NOT_FOUND_MESSAGE), rows[1]);
        }
        Some(HistoryOutcome::Error(error)) => {
            frame.render_widget(error_banner(error), rows[1]);
        }
        Some(HistoryOutcome::Found { task, outputs }) => {
            let mut summary = vec![Line::from(Span::styled(
                history::found_summary(outputs),
                Style::default().fg(Color::Green),
            ))];
            if let Some(task) = task {
                summary.push(Line::from(history::header(task)));
            }
            frame.render_widget(Paragraph::new(summary), rows[1]);

            let items: Vec<ListItem> = outputs
                .iter()
                .enumerate()
                .map(|(index, output)| {
                    let mut lines = vec![Line::from(history::entry_title(output))];
                    if app.history_entries.is_expanded(index) {
                        lines.extend(payload_lines(&history::entry_body(output)));
                    }
                    ListItem::new(Text::from(lines))
                })
                .collect();

            let list = List::new(items)
                .block(entries_block)
                .highlight_style(highlight_style());
            frame.render_stateful_widget(list, rows[2], &mut app.history_entries.state);
        }
    }
}

fn render_footer(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let hints = match app.view {
        View::CreateTask => {
            " Tab field \u{2502} \u{2190}\u{2192} browser \u{2502} Enter start \u{2502} F1-F3 views \u{2502} F5 services \u{2502} Esc quit"
        }
        View::TaskList => {
            " Tab focus \u{2502} \u{2191}\u{2193} navigate \u{2502} Enter expand \u{2502} h history \u{2502} r refresh \u{2502} F5 services \u{2502} Esc quit"
        }
        View::TaskHistory => {
            " Tab focus \u{2502} Enter load/expand \u{2502} \u{2191}\u{2193} navigate \u{2502} r reload \u{2502} F5 services \u{2502} Esc quit"
        }
    };
    let line = Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(line), area);
}

fn input_block(title: &'static str, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
}

fn entries_block(title: &'static str, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::TOP)
        .border_style(focus_style(focused))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn error_banner(error: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))).wrap(Wrap { trim: true })
}

fn payload_lines(payload: &StepPayload) -> Vec<Line<'static>> {
    let style = match payload {
        StepPayload::Structured(_) => Style::default(),
        StepPayload::Raw(_) => Style::default().fg(Color::Yellow),
    };
    payload
        .render_lines()
        .into_iter()
        .map(|line| Line::from(Span::styled(format!("     {line}"), style)))
        .collect()
}

fn status_color(status: Option<TaskStatus>) -> Color {
    match status {
        Some(TaskStatus::Pending) => Color::Blue,
        Some(TaskStatus::Running) => Color::Yellow,
        Some(TaskStatus::Completed) => Color::Green,
        Some(TaskStatus::Failed) => Color::Red,
        Some(TaskStatus::Cancelled) => Color::DarkGray,
        None => Color::Gray,
    }
}

fn health_color(health: &ServiceHealth) -> Color {
    match health {
        ServiceHealth::Unknown => Color::DarkGray,
        ServiceHealth::Connected => Color::Green,
        ServiceHealth::Error(_) => Color::Red,
    }
}
