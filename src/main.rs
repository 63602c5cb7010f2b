//! Matching Minimax - CLI
//!
//! Finds a hidden permutation with single-position probes and minimax-chosen
//! full guesses. Plays against a known answer, every permutation, answers
//! read from a file, or a human at the console.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use matching_minimax::{
    commands::{
        choose_answer, generate_pool, play_from, run_batch_from, run_interactive,
        starting_candidates, write_pool,
    },
    core::{Alphabet, Matching},
    output::{print_batch_statistics, print_game_report},
    pools::{FilePool, PermutationSource, generator::random_pool, generator::rng_from_seed},
    solver::{CandidateSet, FeedbackError, GameConfig, GameError},
};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "matching_minimax",
    about = "Minimax solver for hidden permutations probed one position at a time",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Symbols being permuted, in order (default: 0123456789)
    #[arg(short, long, global = true, default_value = "0123456789")]
    alphabet: String,

    /// Guess pool file for large candidate sets (one permutation per line)
    #[arg(short, long, global = true)]
    pool: Option<String>,

    /// Starting candidates file (one permutation per line); required above 10 symbols
    #[arg(short, long, global = true)]
    candidates: Option<String>,

    /// Size of the random guess pool used when no pool file is given
    #[arg(long, global = true, default_value = "1000")]
    pool_size: usize,

    /// Seed for random answers and pools
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Candidates above this only search the guess pool
    #[arg(long, global = true)]
    large_threshold: Option<usize>,

    /// Candidates at or below this search every permutation
    #[arg(long, global = true)]
    medium_threshold: Option<usize>,

    /// Parallel workers per search (default: alphabet size)
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Stop each search after this many seconds and keep its best guess
    #[arg(long, global = true)]
    deadline_secs: Option<f64>,

    /// Show per-round details and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one hidden answer (default: random)
    Play {
        /// The hidden answer, e.g. 9352741680
        answer: Option<String>,
    },

    /// Answer the solver's questions yourself
    Interactive,

    /// Solve every permutation of the alphabet
    All {
        /// Stop after this many answers
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Solve every answer listed in a file
    File {
        /// One permutation per line
        path: String,

        /// Stop after this many answers
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print distinct random permutations for use as a guess pool
    Generate {
        /// Number of permutations
        count: usize,
    },
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else {
        "warn" // Only show warnings and errors by default
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let alphabet: Alphabet = cli
        .alphabet
        .parse()
        .with_context(|| format!("Invalid alphabet '{}'", cli.alphabet))?;

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play { answer: None });

    match command {
        Commands::Generate { count } => {
            let pool = generate_pool(&alphabet, count, cli.seed);
            write_pool(&mut io::stdout().lock(), &alphabet, &pool)
                .context("Failed to write pool")?;
            Ok(())
        }
        Commands::Play { answer } => {
            let config = build_config(&cli, alphabet)?;
            let answer = choose_answer(&config.alphabet, answer.as_deref(), cli.seed)
                .context("Invalid answer")?;
            let start = load_candidates(&cli, &config)?;
            if !start.contains(&answer) {
                warn!(answer = %answer, "answer is not among the starting candidates");
            }
            info!(answer = %answer, candidates = start.len(), "playing");
            let report = play_from(&config, &start, answer)?;
            print_game_report(&report, &config.alphabet, cli.verbose);
            Ok(())
        }
        Commands::Interactive => {
            let config = build_config(&cli, alphabet)?;
            let start = load_candidates(&cli, &config)?;
            match run_interactive(&config, start) {
                Ok(report) => {
                    print_game_report(&report, &config.alphabet, cli.verbose);
                    Ok(())
                }
                Err(GameError::Feedback(FeedbackError::Aborted | FeedbackError::InputClosed)) => {
                    println!("\nGame stopped.");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::All { limit } => {
            let config = build_config(&cli, alphabet)?;
            let answers: Vec<Matching> = config
                .alphabet
                .permutations()
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            run_batch_command(&cli, &config, &answers)
        }
        Commands::File { path, limit } => {
            let config = build_config(&cli, alphabet)?;
            let mut answers = FilePool::new(&path)
                .read_permutations(&config.alphabet)
                .with_context(|| format!("Failed to load answers from {path}"))?;
            if let Some(limit) = limit {
                answers.truncate(limit);
            }
            run_batch_command(&cli, &config, &answers)
        }
    }
}

fn run_batch_command(cli: &Cli, config: &GameConfig, answers: &[Matching]) -> Result<()> {
    let start = load_candidates(cli, config)?;

    println!("\n{}", "═".repeat(60));
    println!(" Solving {} answers over {} ", answers.len(), config.alphabet);
    println!("{}", "═".repeat(60));

    let stats = run_batch_from(config, &start, answers, true)?;
    print_batch_statistics(&stats, &config.alphabet);
    Ok(())
}

/// Starting candidates from `--candidates`, or every permutation
fn load_candidates(cli: &Cli, config: &GameConfig) -> Result<CandidateSet> {
    match &cli.candidates {
        Some(path) => {
            let mut source = FilePool::new(path);
            starting_candidates(&config.alphabet, Some(&mut source))
                .with_context(|| format!("Failed to load candidates from {path}"))
        }
        None => starting_candidates(&config.alphabet, None).with_context(|| {
            format!(
                "Cannot enumerate every matching of {}; pass --candidates <file>",
                config.alphabet
            )
        }),
    }
}

/// Map CLI flags onto a game configuration
fn build_config(cli: &Cli, alphabet: Alphabet) -> Result<GameConfig> {
    let mut config = if alphabet == Alphabet::digits() {
        GameConfig::canonical()
    } else {
        GameConfig::for_alphabet(alphabet)
    };

    if let Some(large) = cli.large_threshold {
        config.large_threshold = large;
    }
    if let Some(medium) = cli.medium_threshold {
        config.medium_threshold = medium;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(secs) = cli.deadline_secs {
        if !secs.is_finite() || secs <= 0.0 {
            bail!("Deadline must be a positive number of seconds, got {secs}");
        }
        config.search_deadline = Some(Duration::from_secs_f64(secs));
    }

    config.large_pool = match &cli.pool {
        Some(path) => FilePool::new(path)
            .read_permutations(&config.alphabet)
            .with_context(|| format!("Failed to load guess pool from {path}"))?,
        None => random_pool(&config.alphabet, cli.pool_size, &mut rng_from_seed(cli.seed)),
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
