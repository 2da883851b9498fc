mod app;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod report;
mod settings;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use app::AppState;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{deadline_label, status_badge, Filter, ToastKind};
use notifications::Alerts;
use persistence::{
    ensure_data_dir, init_local_data_dir, log_file, read_import, write_export, FileStorage,
    MemoryStorage, SharedStorage,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::achievements;
use settings::{parse_break_minutes, parse_focus_minutes, SettingsStore};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Instant;
use store::TaskStore;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FOCUSFLOW_LOG";

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A terminal task tracker with a Pomodoro focus timer", long_about = None)]
struct Cli {
    /// Use this data directory instead of the local or global .focusflow
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory in the current directory
    Init,
    /// Add a task
    Add {
        title: String,
        #[arg(short, long)]
        subject: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
    },
    /// List tasks
    List {
        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Flip a task between pending and completed
    Toggle {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id or a unique prefix of it
        id: String,
    },
    /// Delete every task
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Export tasks as JSON
    Export {
        /// Output file. Defaults to ./focusflow-tasks-YYYY-MM-DD.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all tasks with the contents of an export file
    Import { file: PathBuf },
    /// Show dashboard statistics and achievements
    Stats,
    /// Show or change settings
    Settings {
        /// Focus duration in minutes (5-60)
        #[arg(long)]
        focus: Option<String>,
        /// Break duration in minutes (1-30)
        #[arg(long = "break")]
        break_minutes: Option<String>,
        /// on / off
        #[arg(long, value_parser = parse_switch)]
        sound: Option<bool>,
        /// on / off
        #[arg(long, value_parser = parse_switch)]
        notifications: Option<bool>,
    },
}

fn parse_switch(raw: &str) -> std::result::Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir_override = cli.data_dir.as_deref();

    match cli.command {
        Some(command) => {
            init_cli_logging()?;
            run_command(command, data_dir_override)
        }
        None => run_tui(data_dir_override),
    }
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow!("invalid {} filter: {}", LOG_ENV, e))
}

/// CLI subcommands log to stderr
fn init_cli_logging() -> Result<()> {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    if let Err(e) = init_result {
        eprintln!("Warning: logging unavailable: {}", e);
    }
    Ok(())
}

/// The terminal UI owns the screen, so logs go to a file in the data directory
fn init_tui_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn open_storage(data_dir_override: Option<&Path>) -> Result<(PathBuf, FileStorage)> {
    let data_dir = ensure_data_dir(data_dir_override)?;
    let storage = FileStorage::open(&data_dir)?;
    Ok((data_dir, storage))
}

/// Resolve a full id or unique prefix to a task id
fn resolve_id(store: &TaskStore<FileStorage>, raw: &str) -> Result<Uuid> {
    match store.ids_matching(raw).as_slice() {
        [id] => Ok(*id),
        [] => bail!("No task matches id '{}'", raw),
        matches => bail!("Id '{}' is ambiguous ({} tasks match)", raw, matches.len()),
    }
}

fn run_command(command: Commands, data_dir_override: Option<&Path>) -> Result<()> {
    if let Commands::Init = command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized FocusFlow directory: {}", data_dir.display());
        println!();
        println!("FocusFlow will now use this local directory for its data.");
        println!("Run 'focusflow' to start.");
        return Ok(());
    }

    let (data_dir, storage) = open_storage(data_dir_override)?;
    info!(data_dir = %data_dir.display(), "using data directory");

    match command {
        Commands::Init => {}
        Commands::Add {
            title,
            subject,
            deadline,
        } => {
            let mut store = TaskStore::load(storage);
            let task = store.add(&title, &subject, &deadline)?;
            println!("Added {} {} (due {})", task.short_id(), task.title, task.deadline_str());
        }
        Commands::List { filter } => {
            let store = TaskStore::load(storage);
            let today = today();
            let tasks = store.filter(filter);
            if tasks.is_empty() {
                println!("No {} tasks.", filter.name().to_lowercase());
            }
            for task in tasks {
                println!(
                    "{}  {:<10} {}  [{}]  {}",
                    task.short_id(),
                    status_badge(task),
                    task.title,
                    task.subject,
                    deadline_label(task, today)
                );
            }
        }
        Commands::Toggle { id } => {
            let mut store = TaskStore::load(storage);
            let id = resolve_id(&store, &id)?;
            store.toggle(id)?;
            if let Some(task) = store.get(id) {
                println!("{} {}  {}", task.short_id(), status_badge(task), task.title);
            }
        }
        Commands::Delete { id } => {
            let mut store = TaskStore::load(storage);
            let id = resolve_id(&store, &id)?;
            store.delete(id)?;
            println!("Deleted task {}", id);
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every task without --yes");
            }
            let mut store = TaskStore::load(storage);
            let count = store.tasks().len();
            store.clear_all()?;
            println!("Deleted {} tasks", count);
        }
        Commands::Export { output } => {
            let store = TaskStore::load(storage);
            let snapshot = store.export_snapshot()?;
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let path = write_export(&snapshot, output.as_deref(), &current_dir, today())?;
            println!("Exported {} tasks to {}", store.tasks().len(), path.display());
        }
        Commands::Import { file } => {
            let payload = read_import(&file)?;
            let mut store = TaskStore::load(storage);
            let count = store.import_replace(&payload)?;
            println!("Imported {} tasks", count);
        }
        Commands::Stats => {
            let store = TaskStore::load(storage);
            let stats = store.stats(today());
            println!("Total tasks:   {}", stats.total);
            println!("Completed:     {}", stats.completed);
            println!("Remaining:     {}", stats.pending);
            println!("Progress:      {}%", stats.completion_rate);
            println!("Productivity:  {}", stats.productivity().name());
            println!("Due today:     {} / {}", stats.due_today_completed, stats.due_today);
            println!();

            let achievements = achievements(&stats);
            let unlocked = achievements.iter().filter(|a| a.unlocked).count();
            println!("Achievements ({} / {}):", unlocked, achievements.len());
            for achievement in &achievements {
                let mark = if achievement.unlocked { "x" } else { " " };
                println!("  [{}] {:<18} {}", mark, achievement.title, achievement.description);
            }
        }
        Commands::Settings {
            focus,
            break_minutes,
            sound,
            notifications,
        } => {
            let mut store = SettingsStore::load(storage);
            let mut settings = store.current();
            if let Some(raw) = focus {
                settings.focus_minutes = parse_focus_minutes(&raw);
            }
            if let Some(raw) = break_minutes {
                settings.break_minutes = parse_break_minutes(&raw);
            }
            if let Some(enabled) = sound {
                settings.sound_enabled = enabled;
            }
            if let Some(enabled) = notifications {
                settings.notifications_enabled = enabled;
            }
            if settings != store.current() {
                store.update(settings)?;
            }

            let current = store.current();
            let switch = |on: bool| if on { "on" } else { "off" };
            println!("Focus:          {} min", current.focus_minutes);
            println!("Break:          {} min", current.break_minutes);
            println!("Sound:          {}", switch(current.sound_enabled));
            println!("Notifications:  {}", switch(current.notifications_enabled));
        }
    }
    Ok(())
}

fn run_tui(data_dir_override: Option<&Path>) -> Result<()> {
    let data_dir = ensure_data_dir(data_dir_override)?;
    init_tui_logging(&log_file(&data_dir))?;
    eprintln!("Using FocusFlow directory: {}", data_dir.display());
    info!(data_dir = %data_dir.display(), "starting terminal UI");

    // Unwritable storage degrades to a session-only store
    let (storage, storage_error): (SharedStorage, Option<String>) = match FileStorage::open(&data_dir) {
        Ok(storage) => (Rc::new(storage) as SharedStorage, None),
        Err(e) => {
            warn!(error = %e, "storage unavailable, changes will not be saved");
            (Rc::new(MemoryStorage::new()) as SharedStorage, Some(e.to_string()))
        }
    };

    let export_dir = std::env::current_dir().unwrap_or_else(|_| data_dir.clone());
    let mut app = AppState::new(storage, Alerts::system(), export_dir, today());
    if let Some(message) = storage_error {
        app.show_toast(
            ToastKind::Error,
            format!("Storage unavailable, changes will not be saved: {}", message),
            Instant::now(),
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();

    if let Err(err) = &result {
        error!(error = %err, "terminal UI stopped with an error");
        eprintln!("Error: {}", err);
    }
    info!("terminal UI closed");

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up in time for the next countdown second
        let timeout = app
            .timer
            .time_until_next_tick(Instant::now())
            .map_or(tick_rate, |until| until.min(tick_rate));

        // Handle events with timeout for ticking
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now(), today());
    }
}
