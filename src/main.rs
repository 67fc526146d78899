use std::{
    fs::File,
    io::{stdout, Stdout},
    path::Path,
    sync::Arc,
    thread,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use blockfall::config::{Args, GameConfig};
use blockfall::game::GameSession;
use blockfall::input::{drain_pending, Command};
use blockfall::ui::{render_session, TerminalRenderer};

type Renderer = TerminalRenderer<CrosstermBackend<Stdout>>;

fn init_logging(path: &Path) -> Result<()> {
    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    let config = args.into_config().context("invalid configuration")?;

    info!(?config, "starting blockfall");

    // Setup terminal
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    let mut renderer = TerminalRenderer::new(terminal, config.rows, config.columns);

    let result = run(&mut renderer, &config);

    // Cleanup runs even when the loop failed
    terminal::disable_raw_mode()?;
    execute!(renderer.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    renderer.terminal_mut().show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "game loop failed");
    }
    info!("exiting blockfall");
    result
}

fn run(renderer: &mut Renderer, config: &GameConfig) -> Result<()> {
    let mut session = GameSession::new(config, Instant::now());
    let frame_budget = config.frame_budget();

    // Game loop
    loop {
        let frame_start = Instant::now();

        for command in drain_pending().context("failed to read input")? {
            if command == Command::Quit {
                return Ok(());
            }
            session.handle(command, Instant::now());
        }

        session.tick(Instant::now());

        render_session(&session, renderer).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}
