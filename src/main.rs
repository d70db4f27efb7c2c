mod activation;
mod app;
mod controller;
mod domain;
mod input;
mod model;
mod notifications;
mod persistence;
mod settings;
mod signal;
mod ticker;
mod ui;

use activation::TerminalActivator;
use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::Task;
use persistence::{init_local_flow, load_queue, log_file, queue_file, save_queue, settings_file};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::JsonSettings;
use std::io;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "A terminal pomodoro timer driven by a queue of tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session length in minutes for this run only (1-58)
    #[arg(short, long)]
    duration: Option<u32>,

    /// Ring the terminal bell when the panel expands
    #[arg(long)]
    bell: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .flow directory in the current directory
    Init,
    /// Append a task to the queue
    Add {
        text: String,
        /// Put the task in the later queue
        #[arg(long)]
        later: bool,
    },
    /// Print the queue
    List,
    /// Manage the known tags
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },
}

#[derive(Subcommand)]
enum TagCommand {
    Add { name: String },
    Remove { name: String },
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let flow_dir = init_local_flow()?;
            println!("Initialized flow directory: {}", flow_dir.display());
            println!();
            println!("Flow will now use this local directory for its queue and settings.");
            Ok(())
        }
        Some(Commands::Add { text, later }) => {
            let path = queue_file()?;
            let mut queue = load_queue(&path)?;
            let mut task = Task::new(text.trim());
            task.staged = !later;
            queue.tasks.push(task);
            save_queue(&path, &queue)?;
            println!("Queued ({} tasks)", queue.tasks.len());
            Ok(())
        }
        Some(Commands::List) => {
            let queue = load_queue(queue_file()?)?;
            for (idx, task) in queue.tasks.iter().enumerate() {
                let later = if task.staged { "" } else { " (later)" };
                let tags: String = task.tags.iter().map(|t| format!(" [{}]", t)).collect();
                println!("{:>3}. {}{}{}", idx + 1, task.text, tags, later);
            }
            Ok(())
        }
        Some(Commands::Tag { action }) => run_tag_command(action),
        None => run_tui(cli.duration, cli.bell),
    }
}

fn run_tag_command(action: TagCommand) -> Result<()> {
    let path = queue_file()?;
    let mut queue = load_queue(&path)?;

    match action {
        TagCommand::Add { name } => {
            if queue.add_tag(name.trim()) {
                save_queue(&path, &queue)?;
                println!("Added tag: {}", name.trim());
            } else {
                println!("Tag already exists: {}", name.trim());
            }
        }
        TagCommand::Remove { name } => {
            if queue.remove_tag(&name) {
                save_queue(&path, &queue)?;
                println!("Removed tag: {}", name);
            } else {
                println!("No such tag: {}", name);
            }
        }
        TagCommand::List => {
            for tag in &queue.tags {
                println!("{}", tag);
            }
        }
    }
    Ok(())
}

/// Log to a file in the flow directory; the terminal belongs to the UI.
/// Filter comes from FLOW_LOG, defaulting to info.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env("FLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file()?)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn run_tui(duration: Option<u32>, bell: bool) -> Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let queue_path = queue_file()?;
    let queue = load_queue(&queue_path)?;
    let settings = JsonSettings::load(settings_file()?)?;
    tracing::info!(tasks = queue.tasks.len(), settings = %settings.path().display(), "starting flow");

    let mut app = AppState::new(
        queue,
        Box::new(settings),
        Box::new(TerminalActivator::new(bell)),
        Some(queue_path),
    );
    if let Some(minutes) = duration {
        app.controller.override_default_pomodoro_duration(minutes);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // A running task goes back to the queue whatever happens to the terminal
    let saved = app.shutdown();

    if let Err(e) = restore_terminal(&mut terminal) {
        tracing::error!(error = %e, "failed to restore terminal");
        eprintln!("Error restoring terminal: {}", e);
    }

    if let Err(e) = &saved {
        tracing::error!(error = %e, "failed to save queue on exit");
        eprintln!("Error saving queue: {}", e);
    }

    if let Err(err) = &result {
        tracing::error!(error = %err, "flow exited with an error");
        eprintln!("Error: {}", err);
    }
    tracing::info!("flow stopped");

    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout so timers keep running
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Terminals report presses reliably, releases rarely
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.controller.poll_timers(Instant::now());
        app.process_events();

        app.save()?;
    }
}
