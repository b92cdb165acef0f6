use std::path::PathBuf;

use clap::Parser;
use judge::{play_tournament, JsonLinesPlayer, LogObserver, MatchConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a match config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of players, when no config file is given
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Seats (starting at 0) played by a human through stdin/stdout
    #[arg(long)]
    human: Vec<usize>,

    /// Overrides how far every automated player looks ahead
    #[arg(long)]
    lookahead: Option<usize>,

    /// How many matches to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::with_players(args.players)?,
    };
    for &seat in &args.human {
        match config.players.get_mut(seat) {
            Some(player) => player.automated = false,
            None => anyhow::bail!("There is no seat {}", seat),
        }
    }
    if let Some(lookahead) = args.lookahead {
        for player in config.players.iter_mut() {
            player.lookahead = lookahead;
        }
    }

    // Human players talk through stdout, so logs go to stderr
    let mut humans = JsonLinesPlayer::new(std::io::stdin().lock(), std::io::stdout().lock());
    let tally = play_tournament(
        &config,
        args.num_games,
        &mut humans,
        &mut LogObserver::default(),
        &mut rng,
    )?;
    eprintln!("{}", tally);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
