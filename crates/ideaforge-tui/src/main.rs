use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ideaforge_service::HttpService;
use ideaforge_tui::app::App;
use ratatui::prelude::*;

/// Terminal client for the ideaforge gateway.
#[derive(Parser, Debug)]
#[command(name = "ideaforge")]
struct Cli {
    /// Gateway base URL
    #[arg(long, env = "IDEAFORGE_SERVER_URL", default_value = "http://127.0.0.1:3720")]
    server: String,

    /// Bearer token for gateways hosted behind an auth proxy
    #[arg(long, env = "IDEAFORGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match cli.api_key.filter(|k| !k.is_empty()) {
        Some(key) => HttpService::with_api_key(&cli.server, key),
        None => HttpService::new(&cli.server),
    };
    let app = App::new(Arc::new(service))?;
    app.wait_for_server(Duration::from_secs(10))?;

    run_tui(app)
}

fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.poll_generation();
        terminal.draw(|frame| app.render(frame))?;

        // Poll with a timeout while a request is in flight, block otherwise
        if app.needs_polling() && !event::poll(Duration::from_millis(200))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless a text field has focus
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
