use std::path::PathBuf;

use clap::Parser;

/// NSGA-II over bit-string genomes, scored against the (m)LOTZ benchmark
/// family.
///
/// `--help`/`-h` is provided automatically by `clap`.
#[derive(Debug, Parser)]
#[command(name = "bitnsga2", version, about)]
pub struct Cli {
    /// Genome length (must be divisible by `objective_size / 2`).
    #[arg(long = "individual-size")]
    pub individual_size: usize,

    /// Number of individuals kept at the end of every generation.
    #[arg(long = "population-size")]
    pub population_size: usize,

    /// Number of mLOTZ objectives (must be even).
    #[arg(long = "objective-size")]
    pub objective_size: usize,

    /// Number of generations to run.
    #[arg(long = "max-iters")]
    pub max_iters: usize,

    /// PRNG seed, for reproducible runs.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Path to the JSON run log.
    #[arg(long, default_value = "bitnsga2-log.json")]
    pub filename: PathBuf,

    /// Generations between JSON log flushes.
    #[arg(long = "print-period", default_value_t = 20)]
    pub print_period: usize,
}
