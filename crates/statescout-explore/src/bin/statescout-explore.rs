//! CLI binary for the statescout exploration engine.
//!
//! Runs a single exploration session or a multi-run comparison of the DFS
//! engine against the Q-learning baseline on one of the built-in
//! environments.
//!
//! # Usage
//!
//! ```bash
//! # One DFS run on the linear trap
//! statescout-explore run --env trap --budget 100 --max-depth 20
//!
//! # Same, without charging replay steps against the budget
//! statescout-explore run --env trap --budget 100 --max-depth 20 --free-replay
//!
//! # Compare DFS and Q-learning over 10 runs, saving report.txt/results.json
//! statescout-explore compare --env toy --budget 50 --runs 10 --output results/
//! ```

use clap::{Parser, Subcommand};
use statescout_env::env_by_name;
use statescout_explore::driver::{evaluate, EvalConfig};
use statescout_explore::explorer::{DfsConfig, DfsExplorer};
use statescout_explore::monitor::EnvMonitor;
use statescout_explore::report::{format_report, format_summary};

#[derive(Parser)]
#[command(name = "statescout-explore")]
#[command(about = "Coverage-driven exploration of episodic state machines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single DFS exploration session.
    Run {
        /// Environment: toy, trap, calendar, or multistart.
        #[arg(short, long, default_value = "toy")]
        env: String,

        /// Global step budget for the run.
        #[arg(short, long, default_value = "100")]
        budget: u64,

        /// Per-episode depth limit.
        #[arg(short, long, default_value = "10")]
        max_depth: usize,

        /// Seed for environments with randomized resets.
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Do not charge replay steps against the budget.
        #[arg(long)]
        free_replay: bool,
    },

    /// Compare DFS against the Q-learning baseline over repeated runs.
    Compare {
        /// Environment: toy, trap, calendar, or multistart.
        #[arg(short, long, default_value = "toy")]
        env: String,

        /// Global step budget per run.
        #[arg(short, long, default_value = "100")]
        budget: u64,

        /// Per-episode depth limit.
        #[arg(short, long, default_value = "10")]
        max_depth: usize,

        /// Runs per strategy.
        #[arg(short, long, default_value = "10")]
        runs: u32,

        /// Base seed (run i uses seed + i).
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Do not charge replay steps against the budget.
        #[arg(long)]
        free_replay: bool,

        /// Directory for report.txt and results.json.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            env,
            budget,
            max_depth,
            seed,
            free_replay,
        } => cmd_run(env, budget, max_depth, seed, free_replay),
        Commands::Compare {
            env,
            budget,
            max_depth,
            runs,
            seed,
            free_replay,
            output,
        } => cmd_compare(env, budget, max_depth, runs, seed, free_replay, output),
    }
}

fn cmd_run(env_name: String, budget: u64, max_depth: usize, seed: u64, free_replay: bool) {
    let env = match env_by_name(&env_name, max_depth, seed) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("═══════════════════════════════════════════════════════════════════════");
    eprintln!("  statescout exploration");
    eprintln!("═══════════════════════════════════════════════════════════════════════");
    eprintln!();
    eprintln!("Configuration:");
    eprintln!("  Environment:  {}", env_name);
    eprintln!("  Budget:       {}", budget);
    eprintln!("  Depth limit:  {}", max_depth);
    eprintln!("  Seed:         {}", seed);
    eprintln!(
        "  Replay cost:  {}",
        if free_replay { "free" } else { "metered" }
    );
    eprintln!();

    let mut monitor = EnvMonitor::new(env);
    let summary = DfsExplorer::new(DfsConfig {
        budget,
        replay_costs_budget: !free_replay,
    })
    .run(&mut monitor);

    println!("{}", format_summary(&summary));

    if !summary.success {
        std::process::exit(2);
    }
}

fn cmd_compare(
    env_name: String,
    budget: u64,
    max_depth: usize,
    runs: u32,
    seed: u64,
    free_replay: bool,
    output: Option<String>,
) {
    let config = EvalConfig {
        env_name,
        max_depth,
        budget,
        runs,
        seed,
        replay_costs_budget: !free_replay,
        output_dir: output.map(Into::into),
    };

    let report = match evaluate(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Evaluation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", format_report(&report));

    if let Some(ref dir) = config.output_dir {
        eprintln!("Saved report to: {}", dir.join("report.txt").display());
        eprintln!("Saved results to: {}", dir.join("results.json").display());
    }
}
