//! Q-learning baseline — the competitor the DFS engine is measured against.
//!
//! Tabular Q-learning over the same Environment/Monitor contract: ε-greedy
//! action choice, one-step temporal-difference updates, sparse Q table
//! (states are discovered, not enumerated). All randomness comes from a
//! seeded ChaCha8 RNG, so a run is reproducible from its seed.

use std::collections::BTreeMap;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use statescout_env::{Action, Environment, StateId};

use crate::monitor::{EnvMonitor, RunStats};

/// Configuration for one Q-learning run.
#[derive(Clone, Debug)]
pub struct QLearningConfig {
    /// Global cap on physical steps across all episodes.
    pub budget: u64,
    /// RNG seed for the exploration policy.
    pub seed: u64,
    pub learning_rate: f64,
    pub discount: f64,
    /// Probability of a uniformly random action.
    pub epsilon: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            budget: 100,
            seed: 42,
            learning_rate: 0.1,
            discount: 0.9,
            epsilon: 0.2,
        }
    }
}

/// Tabular Q-learning agent and runner.
pub struct QLearning {
    config: QLearningConfig,
    q: BTreeMap<StateId, Vec<f64>>,
    rng: ChaCha8Rng,
}

impl QLearning {
    pub fn new(config: QLearningConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            q: BTreeMap::new(),
            rng,
        }
    }

    /// Run until the budget is gone or the task terminates.
    ///
    /// Depth truncation starts a fresh episode (the budget keeps
    /// accumulating across them, exactly as it does for the DFS engine).
    pub fn run<E: Environment>(&mut self, env: &mut EnvMonitor<E>) -> RunStats {
        let action_count = env.action_count();
        info!(
            "Starting Q-learning: budget {} steps, seed {}",
            self.config.budget, self.config.seed
        );

        let mut state = env.reset();
        while env.steps_used() < self.config.budget {
            let action = self.choose_action(state, action_count);
            let out = env.step(action);
            self.update(state, action, out.reward, out.next_state, action_count);
            state = out.next_state;

            if out.terminated {
                break;
            }
            if out.truncated {
                state = env.reset();
            }
        }

        let stats = env.stats();
        info!(
            "Q-learning over: {} steps, coverage {:.1}%",
            stats.steps_used, stats.coverage_percent
        );
        stats
    }

    fn choose_action(&mut self, state: StateId, action_count: usize) -> Action {
        if self.rng.gen::<f64>() < self.config.epsilon {
            self.rng.gen_range(0..action_count)
        } else {
            argmax_first(self.row(state, action_count))
        }
    }

    /// One-step TD update: `Q(s,a) += α (r + γ max Q(s',·) − Q(s,a))`.
    fn update(
        &mut self,
        state: StateId,
        action: Action,
        reward: f64,
        next_state: StateId,
        action_count: usize,
    ) {
        let next_best = self.best_value(next_state);
        let learning_rate = self.config.learning_rate;
        let discount = self.config.discount;
        let row = self.row(state, action_count);
        let old = row[action];
        row[action] = old + learning_rate * (reward + discount * next_best - old);
    }

    fn row(&mut self, state: StateId, action_count: usize) -> &mut Vec<f64> {
        self.q
            .entry(state)
            .or_insert_with(|| vec![0.0; action_count])
    }

    fn best_value(&self, state: StateId) -> f64 {
        self.q
            .get(&state)
            .map(|row| row.iter().copied().fold(f64::MIN, f64::max))
            .unwrap_or(0.0)
    }
}

/// Index of the largest value, first occurrence on ties.
fn argmax_first(row: &[f64]) -> Action {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = i;
        }
    }
    best
}
