use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use record_table::{
    action::Action,
    config::{AppConfig, ConfigError},
    logging::{init_logging, LogConfig},
    reducer::reducer,
    state::AppState,
    ui::RecordTableUi,
};
use record_table_core::{
    process_raw_event, spawn_event_poller, RawEvent, StoreWithMiddleware, TableState,
    TracingMiddleware,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Terminal table of records with search, sort and an edit form
#[derive(Parser, Debug)]
#[command(name = "record-table", version)]
struct Args {
    /// Config file (default: <config dir>/record-table/config.json)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_config = LogConfig::from_verbosity(args.verbose).with_log_file(args.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: could not set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    let (state, ui) = match prepare(&args) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(state, ui).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn prepare(args: &Args) -> Result<(AppState, RecordTableUi), ConfigError> {
    let config = AppConfig::load(args.config.as_deref())?;
    let page_size = config.page_size(args.page_size)?;
    let records = config.record_store()?;
    info!(records = records.len(), page_size, "starting");

    let state = AppState::new(records, TableState::new(page_size));
    Ok((state, RecordTableUi::new(config.keybindings())))
}

async fn run(state: AppState, ui: RecordTableUi) -> io::Result<()> {
    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, ui).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut state: AppState,
    mut ui: RecordTableUi,
) -> io::Result<()> {
    let size = terminal.size()?;
    state.terminal_size = (size.width, size.height);

    let mut store = StoreWithMiddleware::new(state, reducer, TracingMiddleware::new());
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, frame.area(), store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let Some(event) = process_raw_event(raw_event) else {
                    continue;
                };
                for action in ui.map_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                should_render |= store.dispatch(action);
            }

            else => break,
        }
    }

    cancel_token.cancel();
    info!(actions = store.middleware().dispatched(), "shutting down");
    Ok(())
}
