// stackdeck: call-stack and heap animations, previewed in the terminal

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use stackdeck::demos::{self, DEMOS};
use stackdeck::ui::App;

fn usage(program_name: &str) {
    eprintln!("Usage: {} <demo> [--json]", program_name);
    eprintln!();
    eprintln!("Demos:");
    for demo in DEMOS {
        eprintln!("  {:<6} {}", demo.name, demo.description);
    }
    eprintln!();
    eprintln!("  --json   print the recorded scene as JSON instead of previewing it");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never land inside the TUI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("stackdeck");

    let Some(name) = args.get(1) else {
        eprintln!("Error: No demo given");
        eprintln!();
        usage(program_name);
        std::process::exit(1);
    };
    let json = match args.get(2).map(|s| s.as_str()) {
        None => false,
        Some("--json") => true,
        Some(other) => {
            eprintln!("Error: Unknown option '{}'", other);
            usage(program_name);
            std::process::exit(1);
        }
    };

    let Some(demo) = demos::demo(name) else {
        eprintln!("Error: Unknown demo '{}'", name);
        usage(program_name);
        std::process::exit(1);
    };

    let engine = match (demo.build)() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Trace error: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(engine.scene())?);
        return Ok(());
    }

    let console = engine.console().clone();
    let mut app = App::new(demo.name, engine.into_scene(), console);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
