//! The main exploration loop — model-assisted depth-first search.
//!
//! The engine reconciles two views of the same system: the environment is
//! episodic (resettable, depth-truncated), but the traversal it runs is a
//! logically continuous DFS over the state graph. The glue is the frontier
//! stack plus two ways of physically getting back to a popped frontier:
//!
//! 1. **Shortcut** — if the local transition model already knows an action
//!    from the agent's current position straight to the target, take it.
//!    One step instead of a whole reset-and-replay.
//! 2. **Reset + replay** — otherwise start a fresh episode and re-execute
//!    the frontier's stored path action by action.
//!
//! Either route can be cut short by the episode ending (depth truncation,
//! or termination that doesn't solve the task); the frontier is then
//! abandoned for this attempt and the next stack entry takes over. Nothing
//! is retried — popping the next frame IS the recovery path.

use std::collections::BTreeSet;

use log::{debug, info};
use serde::Serialize;
use statescout_env::{Action, Environment, StateId, StepOutcome};

use crate::frontier::{Frontier, FrontierEntry};
use crate::model::TransitionModel;
use crate::monitor::EnvMonitor;
use crate::path::{PathArena, PathId};

/// Configuration for one exploration run.
#[derive(Clone, Debug)]
pub struct DfsConfig {
    /// Global cap on physical steps across all episodes of the run.
    pub budget: u64,
    /// Whether replay steps count against the budget.
    ///
    /// Default `true`: replay models real navigation cost, so it is charged
    /// like forward exploration. Setting this to `false` makes replay free —
    /// an explicit opt-in for experiments that only want to price discovery.
    pub replay_costs_budget: bool,
}

impl Default for DfsConfig {
    fn default() -> Self {
        Self {
            budget: 100,
            replay_costs_budget: true,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// The task's terminal success condition fired.
    Solved,
    /// Every reachable frontier was fully explored before the budget ran out.
    FrontierExhausted,
    /// The step budget ran out first.
    BudgetExhausted,
}

/// Observable record of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub steps_used: u64,
    pub coverage_percent: f64,
    pub success: bool,
    pub edges_explored: usize,
    /// Resets forwarded by the monitor (includes the initial one).
    pub resets: u64,
    pub shortcuts_taken: u64,
    pub replays_attempted: u64,
    pub frontiers_abandoned: u64,
}

/// Result of trying to physically reach a popped frontier.
enum Reach {
    AtTarget,
    Abandoned,
    Solved,
    OutOfBudget,
}

/// Result of deep-diving from a frontier.
enum Dive {
    Done,
    Solved,
    OutOfBudget,
}

/// The exploration engine. All traversal state (model, paths, frontier,
/// visited set) is owned here; the environment side (edge set, budget
/// counter) lives behind the monitor.
pub struct DfsExplorer {
    config: DfsConfig,
    model: TransitionModel,
    paths: PathArena,
    frontier: Frontier,
    visited: BTreeSet<StateId>,
    shortcuts_taken: u64,
    replays_attempted: u64,
    frontiers_abandoned: u64,
}

impl DfsExplorer {
    pub fn new(config: DfsConfig) -> Self {
        Self {
            config,
            model: TransitionModel::new(),
            paths: PathArena::new(),
            frontier: Frontier::new(),
            visited: BTreeSet::new(),
            shortcuts_taken: 0,
            replays_attempted: 0,
            frontiers_abandoned: 0,
        }
    }

    /// Run one full exploration session against a monitored environment.
    ///
    /// Blocks until the task is solved, every reachable frontier is
    /// exhausted, or the budget runs out; the monitor's edge set and step
    /// counter are the observable record of the work performed.
    pub fn run<E: Environment>(&mut self, env: &mut EnvMonitor<E>) -> RunSummary {
        info!(
            "Starting DFS exploration: budget {} steps, replay {}",
            self.config.budget,
            if self.config.replay_costs_budget {
                "metered"
            } else {
                "free"
            }
        );

        let start = env.reset();
        self.visited.insert(start);
        self.frontier.push(FrontierEntry {
            path: PathArena::ROOT,
            state: start,
        });
        let mut current = start;

        let outcome = loop {
            if env.steps_used() >= self.config.budget {
                break RunOutcome::BudgetExhausted;
            }
            let Some(entry) = self.frontier.pop() else {
                break RunOutcome::FrontierExhausted;
            };
            debug!(
                "Frontier: state {} (path len {}, {} deferred)",
                entry.state,
                self.paths.len(entry.path),
                self.frontier.len()
            );

            match self.reach(env, &mut current, entry) {
                Reach::AtTarget => {}
                Reach::Abandoned => {
                    self.frontiers_abandoned += 1;
                    continue;
                }
                Reach::Solved => break RunOutcome::Solved,
                Reach::OutOfBudget => break RunOutcome::BudgetExhausted,
            }

            match self.deep_dive(env, &mut current, entry.path) {
                Dive::Done => {}
                Dive::Solved => break RunOutcome::Solved,
                Dive::OutOfBudget => break RunOutcome::BudgetExhausted,
            }
        };

        let stats = env.stats();
        info!(
            "Run over: {:?} after {} steps, coverage {:.1}%, {} resets",
            outcome,
            stats.steps_used,
            stats.coverage_percent,
            env.reset_count()
        );

        RunSummary {
            outcome,
            steps_used: stats.steps_used,
            coverage_percent: stats.coverage_percent,
            success: stats.success,
            edges_explored: env.edges_explored(),
            resets: env.reset_count(),
            shortcuts_taken: self.shortcuts_taken,
            replays_attempted: self.replays_attempted,
            frontiers_abandoned: self.frontiers_abandoned,
        }
    }

    /// Physically move to the popped frontier: shortcut if the model knows
    /// a direct edge, otherwise hard reset and replay the stored path.
    fn reach<E: Environment>(
        &mut self,
        env: &mut EnvMonitor<E>,
        current: &mut StateId,
        entry: FrontierEntry,
    ) -> Reach {
        // Already standing on the target (the very first frontier, or a
        // branch point revisited right after a self-loop): no movement.
        if *current == entry.state {
            return Reach::AtTarget;
        }

        if let Some(action) = self.model.shortcut(*current, entry.state) {
            debug!(
                "Shortcut {} -> {} via action {}",
                current, entry.state, action
            );
            self.shortcuts_taken += 1;
            let Some(out) = self.metered_step(env, *current, action) else {
                return Reach::OutOfBudget;
            };
            *current = out.next_state;
            self.visited.insert(out.next_state);
            if out.terminated || out.truncated {
                if out.terminated && env.stats().success {
                    return Reach::Solved;
                }
                return Reach::Abandoned;
            }
            return Reach::AtTarget;
        }

        // No known edge over: start a fresh episode and walk the recorded
        // path back out. Note the start state is whatever reset() says —
        // environments are allowed to move it between episodes.
        debug!(
            "Replay to {} ({} actions)",
            entry.state,
            self.paths.len(entry.path)
        );
        self.replays_attempted += 1;
        *current = env.reset();
        self.visited.insert(*current);

        for action in self.paths.actions(entry.path) {
            let Some(out) = self.replay_step(env, *current, action) else {
                return Reach::OutOfBudget;
            };
            *current = out.next_state;
            self.visited.insert(out.next_state);
            if out.terminated || out.truncated {
                if out.terminated && env.stats().success {
                    return Reach::Solved;
                }
                return Reach::Abandoned;
            }
        }
        Reach::AtTarget
    }

    /// From the current physical state, keep taking the first unexplored
    /// action until the dive hits a known state, the depth limit, the
    /// budget, or the success condition.
    fn deep_dive<E: Environment>(
        &mut self,
        env: &mut EnvMonitor<E>,
        current: &mut StateId,
        mut path: PathId,
    ) -> Dive {
        loop {
            let Some(action) = self.first_unexplored(env, *current) else {
                // Frontier exhausted — implicit backtrack to the stack.
                return Dive::Done;
            };

            // Defer this branch point before committing to the action, so
            // its remaining unexplored actions get their own visit later.
            self.frontier.push(FrontierEntry {
                path,
                state: *current,
            });

            let Some(out) = self.metered_step(env, *current, action) else {
                return Dive::OutOfBudget;
            };
            path = self.paths.append(path, action);
            *current = out.next_state;
            let newly_seen = self.visited.insert(out.next_state);

            if out.terminated && env.stats().success {
                return Dive::Solved;
            }
            if !newly_seen {
                // Known state: nothing new down this branch.
                debug!("Dead end at {} (already visited)", current);
                return Dive::Done;
            }
            if out.terminated || out.truncated {
                return Dive::Done;
            }
        }
    }

    /// Smallest action not yet in the explored-edge set, if any.
    fn first_unexplored<E: Environment>(
        &self,
        env: &EnvMonitor<E>,
        state: StateId,
    ) -> Option<Action> {
        (0..env.action_count()).find(|&action| !env.edge_explored(state, action))
    }

    /// One budget-charged step, behind the cooperative budget check.
    /// Records the observed transition in the local model.
    fn metered_step<E: Environment>(
        &mut self,
        env: &mut EnvMonitor<E>,
        from: StateId,
        action: Action,
    ) -> Option<StepOutcome> {
        if env.steps_used() >= self.config.budget {
            return None;
        }
        let out = env.step(action);
        self.model.record(from, action, out.next_state);
        Some(out)
    }

    /// One replay step — metered or free depending on configuration.
    fn replay_step<E: Environment>(
        &mut self,
        env: &mut EnvMonitor<E>,
        from: StateId,
        action: Action,
    ) -> Option<StepOutcome> {
        if self.config.replay_costs_budget {
            self.metered_step(env, from, action)
        } else {
            let out = env.step_unmetered(action);
            self.model.record(from, action, out.next_state);
            Some(out)
        }
    }
}
