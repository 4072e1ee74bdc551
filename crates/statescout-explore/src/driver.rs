//! Run driver — evaluates competing strategies over repeated runs.
//!
//! One evaluation: for each strategy, build a fresh environment per run,
//! wrap it in a fresh monitor, let the strategy spend the budget, and read
//! the monitor's stats. Aggregates mean and standard deviation so the DFS
//! engine and the RL baseline can be compared on equal footing.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use statescout_env::{env_by_name, FactoryError};
use thiserror::Error;

use crate::baseline::{QLearning, QLearningConfig};
use crate::explorer::{DfsConfig, DfsExplorer};
use crate::monitor::EnvMonitor;
use crate::report::format_report;

/// Errors from an evaluation session.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("environment error: {0}")]
    Factory(#[from] FactoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for one evaluation session.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Environment name (see `statescout_env::env_by_name`).
    pub env_name: String,
    /// Per-episode depth limit handed to the environment.
    pub max_depth: usize,
    /// Global step budget handed to each strategy.
    pub budget: u64,
    /// Runs per strategy.
    pub runs: u32,
    /// Base seed; run `i` uses `seed + i`.
    pub seed: u64,
    /// Whether DFS replay steps are charged against the budget.
    pub replay_costs_budget: bool,
    /// Where to write `report.txt` and `results.json`, if anywhere.
    pub output_dir: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            env_name: "toy".to_string(),
            max_depth: 10,
            budget: 100,
            runs: 10,
            seed: 42,
            replay_costs_budget: true,
            output_dir: None,
        }
    }
}

/// The strategies an evaluation can field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrategyKind {
    Dfs,
    QLearning,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Dfs => "DFS",
            StrategyKind::QLearning => "Q-Learning",
        }
    }
}

/// Aggregated results for one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyStats {
    pub name: String,
    pub runs: u32,
    pub successes: u32,
    pub avg_steps: f64,
    pub std_steps: f64,
    pub avg_coverage: f64,
    pub std_coverage: f64,
}

/// Full evaluation report.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub env_name: String,
    pub budget: u64,
    pub max_depth: usize,
    pub runs: u32,
    pub strategies: Vec<StrategyStats>,
}

/// Evaluate the default competitor set: DFS against the Q-learning baseline.
pub fn evaluate(config: &EvalConfig) -> Result<EvalReport, EvalError> {
    evaluate_strategies(config, &[StrategyKind::Dfs, StrategyKind::QLearning])
}

/// Evaluate an explicit set of strategies.
pub fn evaluate_strategies(
    config: &EvalConfig,
    kinds: &[StrategyKind],
) -> Result<EvalReport, EvalError> {
    info!(
        "Evaluation: env {}, depth limit {}, budget {}, {} runs",
        config.env_name, config.max_depth, config.budget, config.runs
    );

    let mut strategies = Vec::new();

    for &kind in kinds {
        let mut steps = Vec::new();
        let mut coverage = Vec::new();
        let mut successes = 0;

        for run in 0..config.runs {
            let run_seed = config.seed.wrapping_add(u64::from(run));
            let env = env_by_name(&config.env_name, config.max_depth, run_seed)?;
            let mut monitor = EnvMonitor::new(env);

            match kind {
                StrategyKind::Dfs => {
                    DfsExplorer::new(DfsConfig {
                        budget: config.budget,
                        replay_costs_budget: config.replay_costs_budget,
                    })
                    .run(&mut monitor);
                }
                StrategyKind::QLearning => {
                    QLearning::new(QLearningConfig {
                        budget: config.budget,
                        seed: run_seed,
                        ..Default::default()
                    })
                    .run(&mut monitor);
                }
            }

            let stats = monitor.stats();
            // Report at most the budget even in free-replay mode, so the
            // strategies stay comparable on one axis.
            steps.push(stats.steps_used.min(config.budget) as f64);
            coverage.push(stats.coverage_percent);
            if stats.success {
                successes += 1;
            }
        }

        strategies.push(StrategyStats {
            name: kind.name().to_string(),
            runs: config.runs,
            successes,
            avg_steps: mean(&steps),
            std_steps: std_dev(&steps),
            avg_coverage: mean(&coverage),
            std_coverage: std_dev(&coverage),
        });
    }

    let report = EvalReport {
        env_name: config.env_name.clone(),
        budget: config.budget,
        max_depth: config.max_depth,
        runs: config.runs,
        strategies,
    };

    if let Some(ref dir) = config.output_dir {
        write_outputs(dir, &report)?;
    }

    Ok(report)
}

fn write_outputs(dir: &Path, report: &EvalReport) -> Result<(), EvalError> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("report.txt"), format_report(report))?;
    fs::write(
        dir.join("results.json"),
        serde_json::to_string_pretty(report)?,
    )?;
    info!("Saved evaluation results to {}", dir.display());
    Ok(())
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Population standard deviation.
fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    (xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
        assert_eq!(std_dev(&[5.0, 5.0, 5.0]), 0.0);
        assert!((std_dev(&[2.0, 4.0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_toy() {
        let config = EvalConfig {
            env_name: "toy".to_string(),
            max_depth: 30,
            budget: 50,
            runs: 3,
            ..Default::default()
        };
        let report = evaluate(&config).unwrap();

        assert_eq!(report.strategies.len(), 2);

        let dfs = &report.strategies[0];
        assert_eq!(dfs.name, "DFS");
        assert_eq!(dfs.successes, 3);
        assert_eq!(dfs.avg_coverage, 100.0);
        // DFS is deterministic on a deterministic environment.
        assert_eq!(dfs.avg_steps, 10.0);
        assert_eq!(dfs.std_steps, 0.0);

        assert_eq!(report.strategies[1].name, "Q-Learning");
    }

    #[test]
    fn test_unknown_env_is_an_error() {
        let config = EvalConfig {
            env_name: "warehouse".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            evaluate(&config),
            Err(EvalError::Factory(FactoryError::UnknownEnv(_)))
        ));
    }

    #[test]
    fn test_output_files_written() {
        let dir = std::env::temp_dir().join("statescout_eval_outputs");
        let _ = fs::remove_dir_all(&dir);

        let config = EvalConfig {
            env_name: "toy".to_string(),
            max_depth: 30,
            budget: 50,
            runs: 1,
            output_dir: Some(dir.clone()),
            ..Default::default()
        };
        evaluate_strategies(&config, &[StrategyKind::Dfs]).unwrap();

        let report_txt = fs::read_to_string(dir.join("report.txt")).unwrap();
        assert!(report_txt.contains("DFS"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("results.json")).unwrap()).unwrap();
        assert_eq!(json["env_name"], "toy");

        let _ = fs::remove_dir_all(&dir);
    }
}
