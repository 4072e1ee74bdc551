//! Model-assisted DFS exploration engine for episodic state machines.
//!
//! This crate implements the core loop that turns an episodic reset/step
//! environment into something a depth-first graph traversal can run
//! against — the problem automated UI exploration faces when it wants
//! systematic coverage out of an interface that can only be driven
//! screen by screen and rewound by restarting the app:
//!
//! ```text
//! 1. Reset → push the start state as the first frontier
//! 2. Pop the most recent frontier (LIFO = depth-first)
//! 3. Get there physically:
//!      - known direct edge from where we stand? take it (one step)
//!      - otherwise reset and replay the frontier's stored path
//!      - episode died on the way? abandon it, goto 2
//! 4. Deep-dive: repeatedly take the first unexplored action, pushing
//!    the current branch point back on the stack before each step
//! 5. Stop diving on a known state or the depth limit, goto 2
//! 6. End when solved, the stack empties, or the budget runs out
//! ```
//!
//! Every physical step is charged against a global budget owned by the
//! [`monitor`]; the monitor also derives coverage and success from the
//! environment's cumulative explored-edge set.
//!
//! # Module Structure
//!
//! - [`monitor`] — budget accounting and run statistics
//! - [`model`] — the agent's local transition model (shortcut lookups)
//! - [`path`] — persistent, arena-backed action paths
//! - [`frontier`] — LIFO stack of deferred branch points
//! - [`explorer`] — the DFS engine itself
//! - [`baseline`] — tabular Q-learning competitor
//! - [`driver`] — multi-run evaluation harness
//! - [`report`] — human-readable report formatting
//!
//! # Determinism
//!
//! The DFS engine contains no randomness: ties break toward the smallest
//! action index, collections are BTree-ordered, and two runs against the
//! same deterministic environment produce identical step sequences. The
//! only seeded RNGs live in the Q-learning baseline and in environments
//! that randomize their start state.

pub mod baseline;
pub mod driver;
pub mod explorer;
pub mod frontier;
pub mod model;
pub mod monitor;
pub mod path;
pub mod report;

pub use baseline::{QLearning, QLearningConfig};
pub use driver::{evaluate, EvalConfig, EvalError, EvalReport, StrategyKind, StrategyStats};
pub use explorer::{DfsConfig, DfsExplorer, RunOutcome, RunSummary};
pub use frontier::{Frontier, FrontierEntry};
pub use model::TransitionModel;
pub use monitor::{EnvMonitor, RunStats};
pub use path::{PathArena, PathId};
pub use report::{format_report, format_summary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _ = TransitionModel::new();
        let _ = PathArena::new();
        let _ = Frontier::new();
        let _ = DfsConfig::default();
        let _ = QLearningConfig::default();
        let _ = EvalConfig::default();
    }
}
