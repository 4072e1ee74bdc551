//! The typed environment contract consumed by the exploration core.
//!
//! The core never touches an environment's internals. Everything it may
//! observe is a fixed, typed method set on [`Environment`] — including the
//! optional success flag, which is a capability query ([`Environment::success`]
//! returns `None` when the environment has no such notion) rather than an
//! untyped attribute lookup.

use std::collections::BTreeSet;
use std::fmt;

/// Opaque, comparable state identifier.
///
/// Signed because some environments (the calendar) let their observation
/// counter go below zero. No structure beyond equality and ordering is
/// assumed by any consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub i64);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action index in `[0, action_count)`. The action set is uniform across
/// states within one environment instance.
pub type Action = usize;

/// Result of one physical step.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// The state the environment is in after the step.
    pub next_state: StateId,
    /// Scalar reward (consumed by the RL baseline; the DFS core ignores it).
    pub reward: f64,
    /// The task's definitive end condition fired on this step.
    pub terminated: bool,
    /// The episode hit its depth limit on this step; no verdict implied.
    pub truncated: bool,
}

/// A resettable state machine with discrete actions and a cumulative
/// explored-edge record.
///
/// Contract notes:
/// - `reset` starts a new episode and may change the start state across
///   calls; it must NOT clear the explored-edge set.
/// - `step` performs exactly one physical transition. An action index
///   outside `[0, action_count)` is a programming error and fails fast.
/// - `explored_edges` is append-only and mutated by `step`.
/// - `max_edges` may be an approximate upper bound for unbounded-state
///   environments.
pub trait Environment {
    /// Start a new episode; returns the (possibly new) start state.
    fn reset(&mut self) -> StateId;

    /// Execute one action.
    fn step(&mut self, action: Action) -> StepOutcome;

    /// Number of legal actions per state.
    fn action_count(&self) -> usize;

    /// Total edges considered complete coverage.
    fn max_edges(&self) -> usize;

    /// Cumulative set of `(state, action)` pairs ever executed.
    fn explored_edges(&self) -> &BTreeSet<(StateId, Action)>;

    /// Explicit task-completion flag, if this environment has one.
    ///
    /// `None` means the environment has no success concept beyond coverage.
    fn success(&self) -> Option<bool> {
        None
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn reset(&mut self) -> StateId {
        (**self).reset()
    }

    fn step(&mut self, action: Action) -> StepOutcome {
        (**self).step(action)
    }

    fn action_count(&self) -> usize {
        (**self).action_count()
    }

    fn max_edges(&self) -> usize {
        (**self).max_edges()
    }

    fn explored_edges(&self) -> &BTreeSet<(StateId, Action)> {
        (**self).explored_edges()
    }

    fn success(&self) -> Option<bool> {
        (**self).success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEnv;

    #[test]
    fn test_state_id_ordering() {
        assert!(StateId(-3) < StateId(0));
        assert!(StateId(0) < StateId(999));
        assert_eq!(StateId(7), StateId(7));
    }

    #[test]
    fn test_state_id_display() {
        assert_eq!(StateId(42).to_string(), "42");
        assert_eq!(StateId(-1).to_string(), "-1");
    }

    #[test]
    fn test_boxed_env_forwards() {
        let mut env: Box<dyn Environment> = Box::new(GraphEnv::toy(10));
        let start = env.reset();
        assert_eq!(start, StateId(0));
        assert_eq!(env.action_count(), 2);
        assert_eq!(env.max_edges(), 6);

        let out = env.step(0);
        assert_eq!(out.next_state, StateId(1));
        assert_eq!(env.explored_edges().len(), 1);
        assert_eq!(env.success(), None);
    }
}
