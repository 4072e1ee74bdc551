//! Date-picker environment: unbounded states, high branching factor.
//!
//! The observation is the currently displayed month. Two actions page the
//! calendar forward and back (the month counter is unbounded in both
//! directions), and the remaining thirty-one actions click a day of the
//! displayed month. Exactly one (month, day) combination completes the
//! task; every other day click is a penalized self-loop. The wide action
//! set is what makes this painful for depth-first search — and the shaped
//! rewards on fresh edges are what give the RL baseline a fighting chance.

use std::collections::BTreeSet;

use crate::contract::{Action, Environment, StateId, StepOutcome};

/// Paging actions plus one action per day 1..=31.
const ACTION_COUNT: usize = 33;

/// Declared coverage denominator; the state space is unbounded, so this is
/// an explicit stand-in bound.
const DECLARED_EDGES: usize = 100_000;

/// Calendar environment. Success on selecting day 15 of month 3.
pub struct CalendarEnv {
    month: i64,
    target_month: i64,
    target_day: i64,
    max_depth: usize,
    episode_step: usize,
    explored: BTreeSet<(StateId, Action)>,
    success: bool,
}

impl CalendarEnv {
    pub fn new(max_depth: usize) -> Self {
        Self {
            month: 0,
            target_month: 3,
            target_day: 15,
            max_depth,
            episode_step: 0,
            explored: BTreeSet::new(),
            success: false,
        }
    }
}

impl Environment for CalendarEnv {
    fn reset(&mut self) -> StateId {
        self.month = 0;
        self.episode_step = 0;
        self.success = false;
        StateId(self.month)
    }

    fn step(&mut self, action: Action) -> StepOutcome {
        assert!(
            action < ACTION_COUNT,
            "action {} out of range (action_count {})",
            action,
            ACTION_COUNT
        );

        self.episode_step += 1;
        let prev = StateId(self.month);

        let mut reward = -0.1;
        let mut terminated = false;

        if self.success {
            // Task already complete; the picker is inert.
        } else if action == 0 {
            self.month += 1;
        } else if action == 1 {
            self.month -= 1;
        } else {
            let selected_day = (action - 1) as i64;
            if self.month == self.target_month && selected_day == self.target_day {
                self.success = true;
                terminated = true;
                reward = 100.0;
            } else {
                // Wrong day (or right day on the wrong month): wasted click.
                reward = -1.0;
            }
        }

        let new_edge = self.explored.insert((prev, action));
        if new_edge {
            // Shaping: reward day clicks on the target month, and forward
            // paging while still short of it.
            if self.month == self.target_month && action > 1 {
                reward += 0.5;
            } else if action == 0 && self.month <= self.target_month {
                reward += 0.5;
            }
        }

        StepOutcome {
            next_state: StateId(self.month),
            reward,
            terminated,
            truncated: self.episode_step >= self.max_depth,
        }
    }

    fn action_count(&self) -> usize {
        ACTION_COUNT
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging() {
        let mut env = CalendarEnv::new(50);
        env.reset();

        assert_eq!(env.step(0).next_state, StateId(1));
        assert_eq!(env.step(0).next_state, StateId(2));
        assert_eq!(env.step(1).next_state, StateId(1));
    }

    #[test]
    fn test_months_go_negative() {
        let mut env = CalendarEnv::new(50);
        env.reset();

        assert_eq!(env.step(1).next_state, StateId(-1));
        assert_eq!(env.step(1).next_state, StateId(-2));
    }

    #[test]
    fn test_wrong_day_is_penalized_self_loop() {
        let mut env = CalendarEnv::new(50);
        env.reset();

        // Day 1 on month 0: no transition, -1.0 for the wasted click.
        let out = env.step(2);
        assert_eq!(out.next_state, StateId(0));
        assert!(!out.terminated);
        assert_eq!(out.reward, -1.0);
    }

    #[test]
    fn test_winning_click() {
        let mut env = CalendarEnv::new(50);
        env.reset();
        env.step(0);
        env.step(0);
        env.step(0); // month 3

        // Action 16 selects day 15. The winning click is also a fresh edge
        // on the target month, so the shaping bonus stacks on top.
        let out = env.step(16);
        assert!(out.terminated);
        assert!((out.reward - 100.5).abs() < 1e-9);
        assert_eq!(env.success(), Some(true));
    }

    #[test]
    fn test_success_is_absorbing() {
        let mut env = CalendarEnv::new(50);
        env.reset();
        env.step(0);
        env.step(0);
        env.step(0);
        env.step(16);

        let out = env.step(0);
        assert_eq!(out.next_state, StateId(3)); // month frozen
        assert!(!out.terminated);
    }

    #[test]
    fn test_forward_shaping_reward() {
        let mut env = CalendarEnv::new(50);
        env.reset();

        // New edge, paging forward while short of the target month.
        let out = env.step(0);
        assert!((out.reward - 0.4).abs() < 1e-9); // -0.1 + 0.5

        env.reset();
        let out = env.step(0); // same edge, no shaping
        assert!((out.reward - (-0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_day_click_shaping_on_target_month() {
        let mut env = CalendarEnv::new(50);
        env.reset();
        env.step(0);
        env.step(0);
        env.step(0); // month 3

        // Wrong day on the right month: -1.0 + 0.5 shaping.
        let out = env.step(2);
        assert!((out.reward - (-0.5)).abs() < 1e-9);
    }
}
