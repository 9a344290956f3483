//! Pensieve, a terminal browser for the wizarding archive.
//!
//! Browses the catalog of houses and wizards with search, trait/house/year
//! filters, spoiler-gating, a derived timeline, and a detail overlay.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! automated testing:
//!
//! ```bash
//! cargo run -p pensieve -- --headless
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pensieve_core::{Catalog, PrefStore};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;
use ui::theme::ArchiveTheme;

const DEFAULT_PREFS_FILE: &str = "pensieve_prefs.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log lines land on stderr, visible after leaving the alternate screen.
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let prefs_path = arg_value(&args, "--prefs").unwrap_or(DEFAULT_PREFS_FILE.to_string());
    let prefs = PrefStore::open(&prefs_path);

    let catalog = match arg_value(&args, "--data") {
        Some(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error: could not read catalog file {path}: {e}");
                    std::process::exit(1);
                }
            };
            match Catalog::from_json(&text) {
                Ok(catalog) => catalog,
                Err(e) => {
                    eprintln!("Error: invalid catalog in {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Catalog::builtin().clone(),
    };
    log::info!(
        "catalog loaded: {} houses, {} wizards",
        catalog.houses().len(),
        catalog.wizards().len()
    );

    let app = App::new(catalog, prefs);

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless(app).map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    let theme = ArchiveTheme::default();

    loop {
        terminal.draw(|f| render(f, &app, &theme))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;

            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);

            match handle_event(&mut app, ev, area) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }
    }
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|ix| args.get(ix + 1))
        .cloned()
}

fn print_help() {
    println!("Pensieve - wizarding archive browser");
    println!();
    println!("USAGE:");
    println!("  pensieve [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run the line-oriented interface (no TUI)");
    println!("  --prefs <path>   Preference file (default: {DEFAULT_PREFS_FILE})");
    println!("  --data <path>    Load a catalog JSON file instead of the built-in data");
    println!();
    println!("KEYS (TUI):");
    println!("  Left/Right       Switch page (Overview, Houses, Wizards, Timeline)");
    println!("  /                Focus the search field");
    println!("  j/k, Up/Down     Move the selection or scroll");
    println!("  Enter            Open the detail view for the selected card");
    println!("  1-9              Toggle trait filters on the houses page");
    println!("  f / y            Cycle the house / year filter on the wizards page");
    println!("  s                Toggle spoiler visibility (persisted)");
    println!("  x                Dismiss the spoiler notice (persisted)");
    println!("  c                Clear the current page's filters");
    println!("  q                Quit");
}
