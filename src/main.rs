#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::time::Duration;

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use naval_arcade::{
    init_logging, sim, terminal, HttpScoreboard, HuntOnly, HuntTarget, ScoreReporter, Session,
    Settings, StaticToken, Strategy,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum StrategyKind {
    HuntTarget,
    Random,
}

#[cfg(feature = "std")]
impl StrategyKind {
    fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::HuntTarget => Box::new(HuntTarget),
            StrategyKind::Random => Box::new(HuntOnly),
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Scoreboard base URL (overrides ARCADE_API_URL)")]
        api_url: Option<String>,
        #[arg(long, help = "Bearer token for score submission (overrides ARCADE_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Computer move delay in milliseconds")]
        delay_ms: Option<u64>,
    },
    /// Measure how many shots a strategy needs to sink a random fleet.
    Sim {
        #[arg(long, default_value_t = 1000)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible runs")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = StrategyKind::HuntTarget)]
        strategy: StrategyKind,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            log::info!("Using fixed seed {}", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            api_url,
            token,
            delay_ms,
        } => {
            let mut settings = Settings::from_env();
            if let Some(url) = api_url {
                settings.api_url = url.trim_end_matches('/').to_string();
            }
            if token.is_some() {
                settings.token = token;
            }
            if let Some(ms) = delay_ms {
                settings.opponent_delay = Duration::from_millis(ms);
            }
            if settings.token.is_none() {
                log::info!("No token configured; scores will not be submitted");
            }

            let scoreboard = HttpScoreboard::new(&settings.api_url)?;
            log::debug!("Scoreboard endpoint {}", scoreboard.endpoint());
            let reporter = ScoreReporter::new(
                Arc::new(scoreboard),
                Arc::new(StaticToken::new(settings.token.clone())),
            );
            let mut session = Session::new(
                make_rng(seed),
                settings.opponent_delay,
                Box::new(HuntTarget),
                reporter,
            );
            let _input = terminal::spawn_input(session.sender(), session.subscribe());
            session.run(terminal::show).await;
        }
        Commands::Sim {
            games,
            seed,
            strategy,
        } => {
            let mut rng = make_rng(seed);
            let mut strategy = strategy.build();
            let report = sim::run(strategy.as_mut(), games, &mut rng)?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}
