//! Table-driven finite graph environment.
//!
//! The transition table maps each state to one destination per action, so
//! arbitrary test graphs can be built declaratively. Stepping from a state
//! with no table row is a self-loop — the environment never gets stuck on a
//! malformed table, it just stops discovering anything new there.

use std::collections::{BTreeMap, BTreeSet};

use crate::contract::{Action, Environment, StateId, StepOutcome};

/// Reward for discovering a new edge.
const NEW_EDGE_REWARD: f64 = 1.0;
/// Penalty for re-executing a known edge.
const REPEAT_PENALTY: f64 = -0.1;

/// A finite directed graph explored through the episodic interface.
///
/// The episode terminates (task complete) when every edge in the table has
/// been executed at least once, and truncates when the per-episode step
/// count reaches the depth limit.
pub struct GraphEnv {
    /// Per-state destination row, indexed by action.
    transitions: BTreeMap<StateId, Vec<StateId>>,
    action_count: usize,
    start: StateId,
    state: StateId,
    max_depth: usize,
    episode_step: usize,
    explored: BTreeSet<(StateId, Action)>,
    /// Edges in the order they were first executed. Resets never clear it,
    /// so two identical runs must produce identical logs.
    discovery_log: Vec<(StateId, Action)>,
}

impl GraphEnv {
    /// Build a graph environment from a transition table.
    ///
    /// Every row must have the same length; that length is the action count.
    pub fn new(start: StateId, transitions: BTreeMap<StateId, Vec<StateId>>, max_depth: usize) -> Self {
        let action_count = transitions
            .values()
            .next()
            .map(Vec::len)
            .unwrap_or_default();
        assert!(action_count > 0, "transition table must not be empty");
        assert!(
            transitions.values().all(|row| row.len() == action_count),
            "all transition rows must have the same action count"
        );

        Self {
            transitions,
            action_count,
            start,
            state: start,
            max_depth,
            episode_step: 0,
            explored: BTreeSet::new(),
            discovery_log: Vec::new(),
        }
    }

    /// The canonical three-screen toy app: Home (0), List (1), Detail (2).
    ///
    /// Action 0 navigates forward, action 1 navigates back; Detail's forward
    /// action is a self-loop. Six edges total.
    pub fn toy(max_depth: usize) -> Self {
        let transitions = BTreeMap::from([
            (StateId(0), vec![StateId(1), StateId(0)]),
            (StateId(1), vec![StateId(2), StateId(0)]),
            (StateId(2), vec![StateId(2), StateId(1)]),
        ]);
        Self::new(StateId(0), transitions, max_depth)
    }

    /// Edges in first-execution order, across the whole run.
    pub fn discovery_log(&self) -> &[(StateId, Action)] {
        &self.discovery_log
    }
}

impl Environment for GraphEnv {
    fn reset(&mut self) -> StateId {
        self.state = self.start;
        self.episode_step = 0;
        self.state
    }

    fn step(&mut self, action: Action) -> StepOutcome {
        assert!(
            action < self.action_count,
            "action {} out of range (action_count {})",
            action,
            self.action_count
        );

        self.episode_step += 1;
        let prev = self.state;
        let next = self
            .transitions
            .get(&prev)
            .map(|row| row[action])
            .unwrap_or(prev);
        self.state = next;

        let new_edge = self.explored.insert((prev, action));
        if new_edge {
            self.discovery_log.push((prev, action));
        }

        StepOutcome {
            next_state: next,
            reward: if new_edge { NEW_EDGE_REWARD } else { REPEAT_PENALTY },
            terminated: self.explored.len() >= self.max_edges(),
            truncated: self.episode_step >= self.max_depth,
        }
    }

    fn action_count(&self) -> usize {
        self.action_count
    }

    fn max_edges(&self) -> usize {
        self.transitions.len() * self.action_count
    }

    fn explored_edges(&self) -> &BTreeSet<(StateId, Action)> {
        &self.explored
    }
}
