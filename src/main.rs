use clap::{Parser, Subcommand};
use erratic::{RepeatingRandomGenerator, ShuffleConfig, ShuffleView, UniqueRandomGenerator};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Lazy random-permutation views", long_about = None)]
struct Cli {
    /// TOML file with shuffle settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed overriding the configuration file
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a shuffled view of the given items
    Shuffle {
        #[arg(value_delimiter = ',', required = true)]
        items: Vec<String>,
        /// Emit a JSON array instead of the bracketed rendering
        #[arg(long)]
        json: bool,
    },
    /// Draw items without replacement, or with replacement when --repeating is set
    Draw {
        #[arg(value_delimiter = ',', required = true)]
        items: Vec<String>,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        repeating: bool,
    },
    /// Reshuffle until every ordering of 0..len has been observed
    Coverage {
        #[arg(long, default_value_t = 4)]
        len: usize,
        #[arg(long, default_value_t = 1_000_000)]
        max_trials: u64,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    let subscriber = tracing_subscriber::fmt::fmt()
        .without_time()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ShuffleConfig::load(path)?,
        None => ShuffleConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Shuffle { items, json } => run_shuffle(items, json, &config)?,
        Commands::Draw {
            items,
            count,
            repeating,
        } => run_draw(items, count, repeating, &config)?,
        Commands::Coverage { len, max_trials } => run_coverage(len, max_trials, &config)?,
    }
    Ok(())
}

fn run_shuffle(items: Vec<String>, json: bool, config: &ShuffleConfig) -> CliResult<()> {
    let view = ShuffleView::with_config(items, config)?;
    if json {
        println!("{}", serde_json::to_string(&view.to_vec())?);
    } else {
        println!("{view}");
    }
    Ok(())
}

fn run_draw(
    items: Vec<String>,
    count: usize,
    repeating: bool,
    config: &ShuffleConfig,
) -> CliResult<()> {
    let drawn: Vec<&String> = if repeating {
        RepeatingRandomGenerator::with_rng(&items, config.rng())?
            .take(count)
            .collect()
    } else {
        let generator = UniqueRandomGenerator::with_rng(&items, config.rng())?;
        if count > generator.len() {
            info!(
                requested = count,
                available = generator.len(),
                "fewer unique items than requested"
            );
        }
        generator.take(count).collect()
    };
    for item in drawn {
        println!("{item}");
    }
    Ok(())
}

fn run_coverage(len: usize, max_trials: u64, config: &ShuffleConfig) -> CliResult<()> {
    if len > 8 {
        return Err(format!("coverage of {len}! orderings is not practical; use len <= 8").into());
    }
    let orderings: usize = (1..=len).product();
    let mut view = ShuffleView::with_config((0..len).collect::<Vec<usize>>(), config)?;
    let mut seen = HashSet::with_capacity(orderings);

    let mut trials = 0u64;
    while seen.len() < orderings && trials < max_trials {
        view.shuffle();
        seen.insert(view.to_vec());
        trials += 1;
    }

    println!(
        "observed {} of {} orderings of {} elements in {} reshuffles",
        seen.len(),
        orderings,
        len,
        trials
    );
    if seen.len() < orderings {
        return Err(format!("stopped after {max_trials} reshuffles").into());
    }
    Ok(())
}
