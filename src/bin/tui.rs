use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};

use tasktrack::client::{
    api::ApiClient,
    view::{self, FilterMode, TaskListView},
};
use tasktrack::domain::task::{CreateTask, Priority, Task};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let api = ApiClient::new(base_url);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create }

#[derive(Clone, Copy, PartialEq, Eq)]
enum ActiveField { Title, Priority, DueDate }

struct App {
    api: ApiClient,
    tasks: Vec<Task>,
    selected: usize,
    last_tick: Instant,
    mode: Mode,
    list_state: ListState,
    filter: FilterMode,
    field: ActiveField,
    title_input: String,
    priority_input: Priority,
    due_date_input: String,
}

impl App {
    /// Replace the list wholesale; a failed fetch keeps the previous list
    /// and surfaces no error.
    async fn refresh(&mut self) {
        if let Ok(tasks) = self.api.list().await {
            self.tasks = tasks;
        }
    }

    /// Create from the compose fields. Blank title sends nothing.
    async fn add(&mut self) {
        let title = self.title_input.trim();
        if !title.is_empty() {
            let input = CreateTask {
                title: title.to_string(),
                priority: self.priority_input,
                due_date: self.due_date_input.trim().parse::<NaiveDate>().ok(),
            };
            let _ = self.api.create(&input).await;
            self.title_input.clear();
            self.refresh().await;
        }
    }
}

fn item_for(entry: &view::DisplayTask) -> ListItem<'static> {
    let t = &entry.task;
    let mark = if t.completed { "[x]" } else { "[ ]" };
    let due = t.due_date.map(|d| format!("  due {d}")).unwrap_or_default();
    let overdue = if entry.overdue { "  OVERDUE" } else { "" };
    let label = format!("{} {}  ({}){}{}", mark, t.title, t.priority.as_str(), due, overdue);
    let style = if t.completed {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else if entry.overdue {
        Style::default().fg(Color::Red)
    } else {
        match t.priority {
            Priority::High => Style::default().fg(Color::LightRed),
            Priority::Medium => Style::default().fg(Color::Yellow),
            Priority::Low => Style::default().fg(Color::Green),
        }
    };
    ListItem::new(label).style(style)
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, api: ApiClient) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App {
        api,
        tasks: vec![],
        selected: 0,
        last_tick: Instant::now(),
        mode: Mode::View,
        list_state: ListState::default(),
        filter: FilterMode::All,
        field: ActiveField::Title,
        title_input: String::new(),
        priority_input: Priority::default(),
        due_date_input: String::new(),
    };
    app.refresh().await;

    loop {
        // Derived afresh every pass so the overdue flags track the clock.
        let visible: TaskListView = view::derive(&app.tasks, app.filter, Utc::now());
        if visible.tasks.is_empty() {
            app.selected = 0;
            app.list_state.select(None);
        } else {
            if app.selected >= visible.tasks.len() {
                app.selected = visible.tasks.len() - 1;
            }
            app.list_state.select(Some(app.selected));
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Tasks (Enter: toggle, n: new, d: delete, f: filter, q: quit)  |  New: type, Tab to switch field, Enter to save, Esc to cancel")
                .block(Block::default().borders(Borders::ALL).title("tasktrack"));
            f.render_widget(header, chunks[0]);

            if app.tasks.is_empty() {
                let empty = Paragraph::new("No tasks yet.")
                    .block(Block::default().borders(Borders::ALL).title("items"));
                f.render_widget(empty, chunks[1]);
            } else {
                let items: Vec<ListItem> = visible.tasks.iter().map(item_for).collect();
                let list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(format!("items [{}]", app.filter.label())))
                    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                    .highlight_symbol(">> ");
                f.render_stateful_widget(list, chunks[1], &mut app.list_state);
            }

            let footer_text = match app.mode {
                Mode::View => format!(
                    "{} tasks left  |  Filter=[{}]  |  API={}",
                    visible.remaining,
                    app.filter.label(),
                    app.api.base_url()
                ),
                Mode::Create => format!(
                    "Create — Title: {}  |  Priority: {}  |  Due: {}  (editing {})",
                    app.title_input,
                    app.priority_input.as_str(),
                    app.due_date_input,
                    match app.field { ActiveField::Title => "title", ActiveField::Priority => "priority", ActiveField::DueDate => "due date" },
                ),
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create" }));
            f.render_widget(footer, chunks[2]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { if app.selected + 1 < visible.tasks.len() { app.selected += 1; } }
                        KeyCode::Enter => {
                            if let Some(entry) = visible.tasks.get(app.selected) {
                                let _ = app.api.set_completed(entry.task.id.0, !entry.task.completed).await;
                                app.refresh().await;
                            }
                        }
                        KeyCode::Char('n') => {
                            app.mode = Mode::Create;
                            app.field = ActiveField::Title;
                            app.title_input.clear();
                            app.priority_input = Priority::default();
                            app.due_date_input.clear();
                        }
                        KeyCode::Char('d') => {
                            if let Some(entry) = visible.tasks.get(app.selected) {
                                let _ = app.api.delete(entry.task.id.0).await;
                                if app.selected > 0 { app.selected -= 1; }
                                app.refresh().await;
                            }
                        }
                        KeyCode::Char('f') => {
                            app.filter = app.filter.next();
                        }
                        _ => {}
                    },
                    Mode::Create => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; }
                        KeyCode::Enter => {
                            app.add().await;
                            app.mode = Mode::View;
                        }
                        KeyCode::Tab => {
                            app.field = match app.field {
                                ActiveField::Title => ActiveField::Priority,
                                ActiveField::Priority => ActiveField::DueDate,
                                ActiveField::DueDate => ActiveField::Title,
                            };
                        }
                        KeyCode::Left | KeyCode::Right => {
                            if app.field == ActiveField::Priority {
                                app.priority_input = match app.priority_input {
                                    Priority::Low => Priority::Medium,
                                    Priority::Medium => Priority::High,
                                    Priority::High => Priority::Low,
                                };
                            }
                        }
                        KeyCode::Backspace => match app.field {
                            ActiveField::Title => { app.title_input.pop(); }
                            ActiveField::DueDate => { app.due_date_input.pop(); }
                            ActiveField::Priority => {}
                        },
                        KeyCode::Char(c) => match app.field {
                            ActiveField::Title => app.title_input.push(c),
                            ActiveField::DueDate => app.due_date_input.push(c),
                            ActiveField::Priority => {}
                        },
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
