use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use elemental_connect::ai::{Agent, AiConfig, LookaheadAgent, RandomAgent};
use elemental_connect::config::AppConfig;
use elemental_connect::game::{ElementType, GameOutcome, GameState, Player, Rules};

/// Play headless games between two agents and report the results.
#[derive(Parser)]
#[command(name = "simulate", about = "Run headless Elemental Connect games between agents")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Agent for player 1
    #[arg(long, value_enum, default_value = "lookahead")]
    p1: AgentKind,

    /// Agent for player 2
    #[arg(long, value_enum, default_value = "random")]
    p2: AgentKind,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Placements after which a game is abandoned
    #[arg(long, default_value_t = 400)]
    max_turns: usize,

    /// Path to TOML configuration file (rules and AI settings)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum AgentKind {
    Lookahead,
    Random,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: usize,
    p1_agent: Option<AgentKind>,
    p2_agent: Option<AgentKind>,
    p1_wins: usize,
    p2_wins: usize,
    draws: usize,
    abandoned: usize,
    /// Wins credited to the player who did not make the final placement.
    destruction_handovers: usize,
    total_placements: usize,
    destruction_rounds: usize,
    pieces_destroyed: usize,
}

struct GameResult {
    outcome: Option<GameOutcome>,
    last_mover: Player,
    placements: usize,
    destruction_rounds: usize,
    pieces_destroyed: usize,
}

fn build_agent(kind: AgentKind, ai: &AiConfig, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Lookahead => Box::new(LookaheadAgent::new(AiConfig {
            seed: Some(seed),
            ..ai.clone()
        })),
        AgentKind::Random => Box::new(RandomAgent::with_seed(seed)),
    }
}

/// Both seats pick an element at random each turn, then let their agent pick
/// the column.
fn play_game(
    rules: Rules,
    agents: &mut [Box<dyn Agent>; 2],
    rng: &mut StdRng,
    max_turns: usize,
) -> Result<GameResult> {
    let mut state = GameState::with_rules(rules);
    let mut result = GameResult {
        outcome: None,
        last_mover: Player::One,
        placements: 0,
        destruction_rounds: 0,
        pieces_destroyed: 0,
    };

    while !state.is_terminal() && result.placements < max_turns {
        let player = state.current_player();
        let agent = &mut agents[player.id() as usize - 1];
        let element = ElementType::ALL[rng.random_range(0..ElementType::ALL.len())];
        state.select_element(element);

        let column = agent
            .choose_column(state.board(), player)
            .with_context(|| format!("{} could not pick a column", agent.name()))?;
        let report = state
            .apply_move(column, player)
            .with_context(|| format!("{} chose column {column}", agent.name()))?;

        result.placements += 1;
        result.last_mover = player;
        if let Some(destruction) = &report.destruction {
            result.destruction_rounds += 1;
            result.pieces_destroyed += destruction.len();
        }
    }

    result.outcome = state.outcome();
    debug!("final board:\n{}", state.board().render());
    Ok(result)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let mut summary = Summary {
        games: cli.games,
        p1_agent: Some(cli.p1),
        p2_agent: Some(cli.p2),
        ..Summary::default()
    };

    info!(games = cli.games, p1 = ?cli.p1, p2 = ?cli.p2, "starting simulation");

    for game in 0..cli.games {
        let seed = cli.seed.wrapping_add(game as u64);
        let mut agents = [
            build_agent(cli.p1, &config.ai, seed),
            build_agent(cli.p2, &config.ai, seed.wrapping_add(1 << 32)),
        ];
        let mut rng = StdRng::seed_from_u64(seed);
        let result = play_game(config.rules, &mut agents, &mut rng, cli.max_turns)
            .with_context(|| format!("game {game}"))?;

        summary.total_placements += result.placements;
        summary.destruction_rounds += result.destruction_rounds;
        summary.pieces_destroyed += result.pieces_destroyed;
        match result.outcome {
            Some(GameOutcome::Winner(winner, _)) => {
                match winner {
                    Player::One => summary.p1_wins += 1,
                    Player::Two => summary.p2_wins += 1,
                }
                if winner != result.last_mover {
                    summary.destruction_handovers += 1;
                }
            }
            Some(GameOutcome::Draw) => summary.draws += 1,
            None => summary.abandoned += 1,
        }
        debug!(game, placements = result.placements, outcome = ?result.outcome, "game finished");
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    let pct = |n: usize| 100.0 * n as f64 / summary.games as f64;
    let name = |kind: Option<AgentKind>| match kind {
        Some(AgentKind::Lookahead) => "lookahead",
        Some(AgentKind::Random) => "random",
        None => "-",
    };

    println!("Games played:        {}", summary.games);
    println!(
        "Player 1 ({:>9}):  {:>5} wins ({:.1}%)",
        name(summary.p1_agent),
        summary.p1_wins,
        pct(summary.p1_wins)
    );
    println!(
        "Player 2 ({:>9}):  {:>5} wins ({:.1}%)",
        name(summary.p2_agent),
        summary.p2_wins,
        pct(summary.p2_wins)
    );
    println!("Draws:               {:>5}", summary.draws);
    println!("Abandoned:           {:>5}", summary.abandoned);
    println!("Won by handover:     {:>5}", summary.destruction_handovers);
    println!(
        "Avg placements:      {:>8.1}",
        summary.total_placements as f64 / summary.games as f64
    );
    println!(
        "Destruction rounds:  {:>5} ({} pieces destroyed)",
        summary.destruction_rounds, summary.pieces_destroyed
    );
}
