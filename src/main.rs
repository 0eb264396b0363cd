use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use elemental_connect::config::AppConfig;
use elemental_connect::engine::{Engine, GameMode};
use elemental_connect::ui::App;

/// Play Elemental Connect in the terminal.
#[derive(Parser)]
#[command(name = "elemental-connect", about = "Connect Four with elemental destruction")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seat assignment: pvp or pvai
    #[arg(long, value_parser = parse_mode)]
    mode: Option<GameMode>,

    /// Override the AI pacing delay in milliseconds
    #[arg(long)]
    ai_delay_ms: Option<u64>,

    /// Seed the AI's random fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs; the terminal belongs to the UI
    #[arg(long, default_value = "elemental_connect.log")]
    log_file: PathBuf,

    /// Print a config file with every default value and exit
    #[arg(long)]
    print_default_config: bool,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    match s {
        "pvp" => Ok(GameMode::PlayerVsPlayer),
        "pvai" => Ok(GameMode::PlayerVsAi),
        other => Err(format!("unknown mode '{other}' (expected 'pvp' or 'pvai')")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(mode) = cli.mode {
        config.game.mode = mode;
    }
    if let Some(delay) = cli.ai_delay_ms {
        config.ai.delay_ms = delay;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
    config.validate().context("validating command line overrides")?;

    info!(mode = config.game.mode.name(), "starting Elemental Connect");

    run(Engine::new(&config)).context("running terminal UI")
}

fn run(engine: Engine) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine);
    let res = app.run(&mut terminal);

    // Restore terminal even when the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
