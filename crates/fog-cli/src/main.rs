//! Fog-of-war chess in the terminal
//!
//! Bootstraps a session on the in-process oracle and plays moves for both
//! seats in turn, either from the command line or from stdin.

use anyhow::Result;
use clap::Parser;
use fog_sync::{GameSession, MoveOutcome};
use fog_types::{MoveRequest, PlayerRole};
use local_oracle::LocalOracle;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

use config::CliConfig;

/// Fog-of-war chess against the local proving oracle
#[derive(Parser, Debug)]
#[command(name = "fogchess")]
#[command(about = "Two-seat fog-of-war chess with per-move state synchronization", long_about = None)]
struct Args {
    /// Moves to play in order, alternating from white (e.g. e2e4 e7e5)
    moves: Vec<String>,

    /// Keep reading moves from stdin after the scripted ones
    #[arg(short, long)]
    interactive: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Seed for the players' secrets (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated proving latency, overrides the config file
    #[arg(long)]
    latency_ms: Option<u64>,
}

/// Whose turn the terminal thinks it is
struct Table {
    session: GameSession,
    turn: PlayerRole,
    show_boards: bool,
}

impl Table {
    async fn play(&mut self, text: &str) {
        let mv: MoveRequest = match text.parse() {
            Ok(mv) => mv,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        match self.session.submit_move(self.turn, mv).await {
            Ok(MoveOutcome::Completed(report)) => {
                println!(
                    "{} played {} (game chain {}, {} pieces in view of {})",
                    report.mover,
                    report.mv,
                    report.game_chain_len,
                    report.opponent_visible_pieces,
                    report.mover.opponent()
                );
                self.turn = self.turn.opponent();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Move {} failed: {:?}", mv, e);
                println!("{}", self.session.message());
                // the mover's half is committed even though the opponent missed it
                if e.is_partial() {
                    self.turn = self.turn.opponent();
                }
            }
        }

        if self.show_boards {
            self.print_boards();
        }
    }

    async fn retry(&self) {
        match self.session.retry_consumption().await {
            Ok(MoveOutcome::Recovered { consumer }) => println!("{} view restored", consumer),
            Ok(_) => println!("Nothing to retry"),
            Err(_) => println!("{}", self.session.message()),
        }
    }

    fn print_boards(&self) {
        for role in PlayerRole::ALL {
            let stale = if self.session.is_view_stale(role) {
                " (stale)"
            } else {
                ""
            };
            println!("{} sees{}:\n{}", role, stale, self.session.board(role));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(latency_ms) = args.latency_ms {
        config.oracle.latency_ms = latency_ms;
    }
    tracing::info!("Starting fogchess with {:?}", config);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let oracle = LocalOracle::new(config.oracle.clone());
    let session =
        GameSession::bootstrap(&oracle, Arc::new(oracle.clone()), config.sync.clone(), &mut rng)
            .await?;

    let mut table = Table {
        session,
        turn: PlayerRole::White,
        show_boards: config.show_boards,
    };

    for text in &args.moves {
        table.play(text).await;
    }

    if args.interactive {
        println!("Enter moves like e2e4; 'retry', 'boards' or 'quit'");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "" => continue,
                "quit" | "exit" => break,
                "retry" => table.retry().await,
                "boards" => table.print_boards(),
                text => {
                    table.play(text).await;
                }
            }
        }
    }

    table.print_boards();
    Ok(())
}
