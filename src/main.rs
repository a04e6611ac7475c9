use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake_duel::agents::AgentKind;
use snake_duel::game::GameConfig;
use snake_duel::metrics::Confidence;
use snake_duel::runner::{compare_teams, CompareConfig};

#[derive(Parser)]
#[command(name = "snake-duel")]
#[command(version, about = "Compare greedy snake heuristics in a two-snake food race")]
struct Cli {
    /// Team to run: random, fully-greedy, partially-greedy or all
    #[arg(long, default_value = "partially-greedy")]
    agents: String,

    /// Episodes per team
    #[arg(long, default_value = "30")]
    episodes: usize,

    /// Base seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Game configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    jobs: Option<usize>,

    /// Confidence level for the error bars: 0.90, 0.95 or 0.99
    #[arg(long, default_value = "0.95")]
    confidence: Confidence,

    /// Print the full reports as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,
}

fn parse_agents(agents: &str) -> Result<Vec<AgentKind>> {
    if agents.trim().eq_ignore_ascii_case("all") {
        return Ok(AgentKind::ALL.to_vec());
    }
    agents
        .split(',')
        .map(|name| name.parse::<AgentKind>().map_err(Into::into))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let game = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GameConfig::default(),
    };
    let kinds = parse_agents(&cli.agents)?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    info!(
        teams = kinds.len(),
        episodes = cli.episodes,
        seed,
        board = %format!("{}x{}", game.board_width, game.board_height),
        "starting comparison"
    );

    let config = CompareConfig {
        game,
        episodes: cli.episodes,
        seed,
        jobs: cli.jobs,
    };
    let reports = compare_teams(&kinds, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}\n", report.stats.format_summary(cli.confidence));
        }
    }

    Ok(())
}
