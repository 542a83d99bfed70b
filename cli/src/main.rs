use anyhow::Result;
use tracing_subscriber::EnvFilter;

use submarines_cli::game::{run_interactive, GameConfig};
use submarines_cli::setup::{standard_fleet, DEFAULT_ARENA};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut players: Vec<String> = std::env::args().skip(1).collect();
    if players.is_empty() {
        players = vec!["Player1".to_string(), "Player2".to_string()];
    }

    let config = GameConfig {
        players,
        arena: DEFAULT_ARENA,
        fleet: standard_fleet(),
    };
    run_interactive(config, &mut rand::thread_rng())
}
