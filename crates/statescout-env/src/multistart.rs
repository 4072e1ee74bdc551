//! Randomized-entry environment: three landing pages, one hub, two leaves.
//!
//! Each reset drops the agent on one of three entry states chosen by a
//! seeded RNG, so an explorer has to go through multiple episodes before it
//! has even seen every entrance. There is no success state; the goal is
//! pure coverage.

use std::collections::BTreeSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::contract::{Action, Environment, StateId, StepOutcome};

/// 3 entries x 2 + hub x 2 + 2 leaves x 2.
const TOTAL_EDGES: usize = 12;

const HUB: StateId = StateId(3);

/// Multi-start environment. Two actions; no explicit success flag.
pub struct MultiStartEnv {
    rng: ChaCha8Rng,
    state: StateId,
    max_depth: usize,
    episode_step: usize,
    explored: BTreeSet<(StateId, Action)>,
}

impl MultiStartEnv {
    pub fn new(max_depth: usize, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: StateId(0),
            max_depth,
            episode_step: 0,
            explored: BTreeSet::new(),
        }
    }
}

impl Environment for MultiStartEnv {
    fn reset(&mut self) -> StateId {
        self.state = StateId(self.rng.gen_range(0..3));
        self.episode_step = 0;
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

        let next = match prev.0 {
            // Entry pages: action 0 goes to the hub, action 1 is a no-op.
            0..=2 => {
                if action == 0 {
                    HUB
                } else {
                    prev
                }
            }
            // Hub: one leaf per action.
            3 => {
                if action == 0 {
                    StateId(4)
                } else {
                    StateId(5)
                }
            }
            // Leaves: everything returns to the hub.
            _ => HUB,
        };
        self.state = next;

        let new_edge = self.explored.insert((prev, action));

        StepOutcome {
            next_state: next,
            reward: if new_edge { 1.0 } else { -0.1 },
            terminated: self.explored.len() >= TOTAL_EDGES,
            truncated: self.episode_step >= self.max_depth,
        }
    }

    fn action_count(&self) -> usize {
        2
    }

    fn max_edges(&self) -> usize {
        TOTAL_EDGES
    }

    fn explored_edges(&self) -> &BTreeSet<(StateId, Action)> {
        &self.explored
    }
}
