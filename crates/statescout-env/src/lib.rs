//! Resettable state-machine environments for statescout.
//!
//! An [`Environment`](contract::Environment) is a finite (or practically
//! unbounded) directed graph of application states whose edges can only be
//! discovered by issuing discrete actions through an episodic reset/step
//! interface — the same shape as automated UI exploration, where each
//! "screen" is a state and each tappable widget is an action.
//!
//! Every environment here keeps a cumulative set of explored
//! `(state, action)` edges that survives episode resets within a run; that
//! set is the coverage record the exploration algorithms are scored on.
//!
//! # Module Structure
//!
//! - [`contract`] — the typed Environment trait and step types
//! - [`graph`] — table-driven finite graph (includes the canonical toy graph)
//! - [`trap`] — deep linear trap with a one-action escape to a success state
//! - [`calendar`] — unbounded month/day picker with a single winning click
//! - [`multistart`] — randomized entry points, coverage-only goal
//! - [`factory`] — build an environment by name

pub mod calendar;
pub mod contract;
pub mod factory;
pub mod graph;
pub mod multistart;
pub mod trap;

pub use calendar::CalendarEnv;
pub use contract::{Action, Environment, StateId, StepOutcome};
pub use factory::{env_by_name, FactoryError};
pub use graph::GraphEnv;
pub use multistart::MultiStartEnv;
pub use trap::TrapEnv;
