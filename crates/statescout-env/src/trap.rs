//! Deep linear trap with a one-action escape.
//!
//! A chain of interior states reachable only by action 0, one at a time;
//! action 1 from any interior state jumps straight to the absorbing success
//! state. The entry state always moves to the first interior state no
//! matter which action is taken. A depth-limited explorer dives into the
//! chain, gets truncated, and must recover via reset and replay — the
//! scenario this environment exists to exercise.

use std::collections::BTreeSet;

use crate::contract::{Action, Environment, StateId, StepOutcome};

/// The absorbing success state.
pub const SUCCESS_STATE: StateId = StateId(999);

/// Declared coverage denominator. Deliberately an approximation: the chain
/// has far more real edges than anyone should have to visit, so coverage
/// percent reflects "cost of fully exploring the trap" rather than a true
/// edge count.
const DECLARED_EDGES: usize = 50;

/// Linear trap environment. Two actions; explicit success flag.
pub struct TrapEnv {
    state: StateId,
    max_depth: usize,
    episode_step: usize,
    explored: BTreeSet<(StateId, Action)>,
    success: bool,
}

impl TrapEnv {
    pub fn new(max_depth: usize) -> Self {
        Self {
            state: StateId(0),
            max_depth,
            episode_step: 0,
            explored: BTreeSet::new(),
            success: false,
        }
    }
}

impl Environment for TrapEnv {
    fn reset(&mut self) -> StateId {
        self.state = StateId(0);
        self.episode_step = 0;
        self.success = false;
        self.state
    }

    fn step(&mut self, action: Action) -> StepOutcome {
        assert!(
            action < 2,
            "action {} out of range (action_count 2)",
            action
        );

        self.episode_step += 1;
        let prev = self.state;

        let next = if prev == StateId(0) {
            StateId(1)
        } else if prev == SUCCESS_STATE {
            SUCCESS_STATE
        } else if action == 0 {
            StateId(prev.0 + 1)
        } else {
            SUCCESS_STATE
        };
        self.state = next;

        let new_edge = self.explored.insert((prev, action));

        let (terminated, reward) = if next == SUCCESS_STATE {
            self.success = true;
            (true, 100.0)
        } else {
            // Novelty pays off only near the entrance; the deep chain is
            // all cost.
            let reward = if new_edge && next.0 <= 5 { 0.1 } else { -0.1 };
            (false, reward)
        };

        StepOutcome {
            next_state: next,
            reward,
            terminated,
            truncated: self.episode_step >= self.max_depth,
        }
    }

    fn action_count(&self) -> usize {
        2
    }

    fn max_edges(&self) -> usize {
        DECLARED_EDGES
    }

    fn explored_edges(&self) -> &BTreeSet<(StateId, Action)> {
        &self.explored
    }

    fn success(&self) -> Option<bool> {
        Some(self.success)
    }
}
