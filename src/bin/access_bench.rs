use clap::Parser;
use erratic::{PermutationMapping, ShuffleConfig, ShuffleView};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

struct AccessResult {
    len: usize,
    samples: u32,
    first_pass_ns: f64,
    repeat_pass_ns: f64,
    reshuffle_ns: f64,
    first_touch_ns: f64,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Measures first-access against repeat-access cost of shuffled views"
)]
struct AccessBenchCli {
    /// Comma-separated list of view lengths (e.g. 1000,100000)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    lens: Option<Vec<usize>>,
    /// Reshuffles timed per length
    #[arg(long, default_value_t = 5)]
    samples: u32,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = AccessBenchCli::parse();
    println!("=== Lazy Shuffle Access Benchmark ===\n");

    let lens = cli
        .lens
        .unwrap_or_else(|| vec![1_000, 10_000, 100_000, 1_000_000]);
    let config = ShuffleConfig { seed: cli.seed };
    let samples = cli.samples.max(1);

    let progress = ProgressBar::new(lens.len() as u64 * samples as u64);
    match ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        Ok(style) => progress.set_style(style),
        Err(err) => eprintln!("  ✗ progress style rejected: {err}"),
    }

    let mut results = Vec::new();
    for &len in &lens {
        progress.set_message(format!("n={len}"));
        match run_benchmark(len, samples, &config, &progress) {
            Ok(result) => results.push(result),
            Err(err) => eprintln!("  ✗ Benchmark for n={len} failed: {err}"),
        }
    }
    progress.finish_and_clear();

    println!("=== Summary Report ===\n");
    print_summary_table(&results);
}

fn run_benchmark(
    len: usize,
    samples: u32,
    config: &ShuffleConfig,
    progress: &ProgressBar,
) -> Result<AccessResult, Box<dyn std::error::Error>> {
    let mut view = ShuffleView::with_config((0..len as u64).collect::<Vec<u64>>(), config)?;

    let mut first = Duration::ZERO;
    let mut repeat = Duration::ZERO;
    let mut reshuffle = Duration::ZERO;
    let mut checksum = 0u64;

    for _ in 0..samples {
        let start = Instant::now();
        view.shuffle();
        reshuffle += start.elapsed();

        let start = Instant::now();
        checksum = checksum.wrapping_add(view.iter().sum::<u64>());
        first += start.elapsed();

        let start = Instant::now();
        checksum = checksum.wrapping_add(view.iter().sum::<u64>());
        repeat += start.elapsed();

        progress.inc(1);
    }

    let expected = (len as u64).saturating_sub(1) * len as u64 / 2;
    if checksum != expected.wrapping_mul(2 * samples as u64) {
        return Err("shuffled view lost or duplicated elements".into());
    }

    let mut mapping = PermutationMapping::shuffled(len)?;
    let start = Instant::now();
    if len > 0 {
        mapping.resolve(len / 2)?;
    }
    let first_touch = start.elapsed();

    let accesses = (len.max(1) as f64) * samples as f64;
    Ok(AccessResult {
        len,
        samples,
        first_pass_ns: first.as_nanos() as f64 / accesses,
        repeat_pass_ns: repeat.as_nanos() as f64 / accesses,
        reshuffle_ns: reshuffle.as_nanos() as f64 / samples as f64,
        first_touch_ns: first_touch.as_nanos() as f64,
    })
}

fn print_summary_table(results: &[AccessResult]) {
    println!(
        "{:<10} {:<8} {:<16} {:<16} {:<14} {:<14}",
        "Len", "Samples", "First(ns/idx)", "Repeat(ns/idx)", "Shuffle(ns)", "Touch(ns)"
    );
    println!("{}", "-".repeat(82));

    for result in results {
        println!(
            "{:<10} {:<8} {:<16.2} {:<16.2} {:<14.0} {:<14.0}",
            result.len,
            result.samples,
            result.first_pass_ns,
            result.repeat_pass_ns,
            result.reshuffle_ns,
            result.first_touch_ns
        );
    }
}
