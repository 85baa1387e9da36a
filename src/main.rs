//! Loadout - Entry Point
//!
//! Sets up logging and the terminal, starts the catalog load in the
//! background and runs the UI loop. The final link is printed on exit.

use std::io;
use std::time::{Duration, Instant};
use std::fs::OpenOptions;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use loadout::catalog::{spawn_catalog_load, PendingCatalog};
use loadout::config::load_settings;
use loadout::picker::{ClassFilter, FilterState};
use loadout::session::Session;
use loadout::share::{shared_location, Location, UrlSync};
use loadout::ui::App;

/// Target frames per second for the UI loop
const TARGET_FPS: u64 = 30;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

fn main() -> Result<()> {
    init_logging();

    log::info!("Starting Loadout v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings();
    let start = std::env::args().nth(1).unwrap_or_default();
    let location = shared_location(Location::parse(&start));
    log::info!("Initial location: {}", location.lock().href());

    let mut session = Session::new(
        location.clone(),
        FilterState::new(ClassFilter::all(), settings.default_type_filter),
    );
    session.subscribe(Box::new(UrlSync::new(location.clone(), settings.history_mode)));

    let mut pending = spawn_catalog_load(settings.catalog_source());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_loop(&mut terminal, &mut app, &mut session, &mut pending);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Loadout exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    // The address bar equivalent: pass this back in to restore the loadout
    let href = location.lock().href();
    println!("{}", href);

    log::info!("Loadout shut down cleanly");
    result
}

/// Log to a file so output does not interfere with the TUI
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );

    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("loadout.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // No writable log file: keep logging off rather than drawing over the UI
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.init();
}

/// Main UI loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
    pending: &mut PendingCatalog,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Catalog arrives once; the session gate handles the ordering
        if let Some(catalog) = pending.poll() {
            session.catalog_ready(catalog);
        }

        terminal.draw(|frame| {
            app.render(frame, session);
        })?;

        let timeout = FRAME_TIME.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, session) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }
    }

    Ok(())
}
