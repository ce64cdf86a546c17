mod app;
mod board;
mod calendar;
mod cli;
mod config;
mod demo;
mod drag;
mod editor;
mod error;
mod logging;
mod placement;
mod store;
mod task;
mod ui;

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use app::App;
use board::BoardSnapshot;
use cli::{Cli, Commands};
use config::Config;
use store::TaskStore;

/// How often the loop wakes without input to pick up a date change.
const TICK: Duration = Duration::from_secs(30);

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn build_store(config: &Config, seed_demo: bool, today: NaiveDate) -> TaskStore {
    let mut store = TaskStore::with_timeline(today, config.timeline_days);
    if seed_demo {
        demo::seed(&mut store, today);
    }
    store
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::resolve_config(cli.config.as_deref())?;
    let seed_demo = config.seed_demo && !cli.no_demo;

    match cli.command {
        Some(Commands::Board { json, today }) => {
            logging::init_stderr(&config.log_level);
            let today = match today {
                Some(day) => calendar::parse_day(&day)?,
                None => local_today(),
            };
            Ok(print_board(&config, seed_demo, today, json)?)
        }
        None => {
            // The TUI owns the terminal, so without a log file it runs unlogged.
            let _guard = match logging::init_file(&config.log_level) {
                Ok(guard) => Some(guard),
                Err(err) => {
                    eprintln!("planboard: logging disabled: {err}");
                    None
                }
            };
            run_tui(&config, seed_demo)
        }
    }
}

fn print_board(
    config: &Config,
    seed_demo: bool,
    today: NaiveDate,
    json: bool,
) -> error::Result<()> {
    let store = build_store(config, seed_demo, today);
    let slots = calendar::time_slots(
        config.slot_start_hour,
        config.slot_end_hour,
        config.slot_minutes,
    );
    let snapshot = BoardSnapshot::build(&store, today, &slots);
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", snapshot.render_text());
    }
    Ok(())
}

fn run_tui(config: &Config, seed_demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let today = local_today();
    let mut app = App::new(build_store(config, seed_demo, today), config, today);
    info!(tasks = app.store.tasks().len(), "starting board");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "board exited with error");
    }
    info!("board closed");
    Ok(result?)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            app.set_today(local_today());
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
        app.set_today(local_today());
    }
    Ok(())
}
