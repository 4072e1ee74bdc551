//! Local transition model — the agent's partial map of the graph.
//!
//! Populated exclusively from transitions the agent has physically
//! executed; it never sees ground truth. Its one job: answer "do I already
//! know a single action that takes me from here to that frontier?" so the
//! explorer can skip a full reset-and-replay.
//!
//! BTreeMaps keep iteration order deterministic, which makes the
//! smallest-action tie-break below deterministic too.

use std::collections::BTreeMap;

use statescout_env::{Action, StateId};

/// Partial `(state, action) -> next_state` map.
#[derive(Debug, Default)]
pub struct TransitionModel {
    edges: BTreeMap<StateId, BTreeMap<Action, StateId>>,
}

impl TransitionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an executed transition. Upsert: a conflicting observation for
    /// the same `(state, action)` simply overwrites (last write wins);
    /// environments are assumed mostly deterministic but the model must
    /// tolerate the exceptions.
    pub fn record(&mut self, state: StateId, action: Action, next_state: StateId) {
        self.edges.entry(state).or_default().insert(action, next_state);
    }

    /// Smallest action known to lead directly from `from` to `target`.
    pub fn shortcut(&self, from: StateId, target: StateId) -> Option<Action> {
        self.edges
            .get(&from)?
            .iter()
            .find(|(_, &next)| next == target)
            .map(|(&action, _)| action)
    }

    /// Recorded destination for `(state, action)`, if any.
    pub fn transition(&self, state: StateId, action: Action) -> Option<StateId> {
        self.edges.get(&state)?.get(&action).copied()
    }

    /// Number of states with at least one recorded outgoing edge.
    pub fn known_states(&self) -> usize {
        self.edges.len()
    }
}
