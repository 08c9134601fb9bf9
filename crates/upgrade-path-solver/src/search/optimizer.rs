// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    eval::path::PathEvaluator,
    monitor::{observer::SearchObserver, stop::StopToken},
    search::{
        dead::DeadMove,
        moves::{
            insert::InsertMove,
            remove::RemoveMove,
            rotate::{BoundedRotateMove, ExhaustiveRotateMove},
            swap::SwapMove,
            traits::{MoveContext, NeighborhoodMove},
        },
        state::SearchState,
    },
};

/// Length of the move duty cycle in iterations.
const DUTY_CYCLE: u64 = 100;
/// Slots `[0, INSERT_SLOTS)` of the cycle try Insert.
const INSERT_SLOTS: u64 = 15;
/// Slots `[INSERT_SLOTS, REMOVE_SLOTS)` try Remove.
const REMOVE_SLOTS: u64 = 30;
/// Slots `[REMOVE_SLOTS, ROTATE_SLOTS)` try the bounded rotation; the rest try Swap.
const ROTATE_SLOTS: u64 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The stall counter reached its limit.
    StallLimit,
    /// A full rotation scan found nothing after every other move was exhausted.
    RotationExhausted,
    /// A [`StopToken`] was triggered.
    Stopped,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TerminationReason::StallLimit => "StallLimit",
            TerminationReason::RotationExhausted => "RotationExhausted",
            TerminationReason::Stopped => "Stopped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub iterations: u64,
    pub improvements: u64,
    /// Candidate paths scored during the run.
    pub evaluations: u64,
    pub reason: TerminationReason,
    pub initial_score: f64,
    pub final_score: f64,
}

/// First-improvement hill climber over upgrade paths.
///
/// Each iteration runs one move, chosen by a fixed duty cycle among the
/// moves that are not exhausted. Once Insert, Remove and Swap are all
/// exhausted, a full rotation scan decides whether the path is a local
/// optimum. Any accepted move revives every move and resets the stall
/// counter.
#[derive(Debug)]
pub struct LocalSearchOptimizer<'e> {
    evaluator: &'e PathEvaluator,
    allow_speed: bool,
    max_stall: u64,
    stop: Option<StopToken>,
    insert: InsertMove,
    remove: RemoveMove,
    swap: SwapMove,
    rotate: BoundedRotateMove,
    rotate_exhaustive: ExhaustiveRotateMove,
}

impl<'e> LocalSearchOptimizer<'e> {
    pub fn new(evaluator: &'e PathEvaluator) -> Self {
        Self {
            evaluator,
            allow_speed: true,
            max_stall: 20_000,
            stop: None,
            insert: InsertMove::new(),
            remove: RemoveMove::new(),
            swap: SwapMove::new(),
            rotate: BoundedRotateMove::new(),
            rotate_exhaustive: ExhaustiveRotateMove::new(),
        }
    }

    #[inline]
    pub fn with_allow_speed(mut self, yes: bool) -> Self {
        self.allow_speed = yes;
        self
    }

    /// Consecutive failed iterations before giving up; zero skips the search.
    #[inline]
    pub fn with_max_stall(mut self, n: u64) -> Self {
        self.max_stall = n;
        self
    }

    #[inline]
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = Some(stop);
        self
    }

    fn select<R: rand::Rng>(
        &self,
        state: &SearchState<R>,
        iteration: u64,
    ) -> Option<&dyn NeighborhoodMove<R>> {
        let dead = state.dead();
        if dead.local_moves_exhausted() {
            return Some(&self.rotate_exhaustive);
        }

        let slot = iteration % DUTY_CYCLE;
        if slot < INSERT_SLOTS && !dead.is_dead(DeadMove::Insert) {
            Some(&self.insert)
        } else if slot < REMOVE_SLOTS && !dead.is_dead(DeadMove::Remove) {
            Some(&self.remove)
        } else if slot < ROTATE_SLOTS {
            Some(&self.rotate)
        } else if !dead.is_dead(DeadMove::Swap) {
            Some(&self.swap)
        } else {
            None
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "LocalSearchOptimizer::run",
        skip(self, state, observer),
        fields(max_stall = self.max_stall, allow_speed = self.allow_speed)
    )]
    pub fn run<R: rand::Rng>(
        &self,
        state: &mut SearchState<R>,
        observer: &mut dyn SearchObserver,
    ) -> SearchOutcome {
        let initial_score = state.score();
        observer.on_search_start(initial_score, state.path());

        let mut ctx = MoveContext::new(self.evaluator, self.allow_speed);
        let mut iterations = 0u64;
        let mut improvements = 0u64;
        let mut stall = 0u64;

        let reason = loop {
            if stall >= self.max_stall {
                break TerminationReason::StallLimit;
            }
            if self.stop.as_ref().is_some_and(StopToken::is_set) {
                break TerminationReason::Stopped;
            }
            if state.dead().is_dead(DeadMove::RotateExhausted) {
                break TerminationReason::RotationExhausted;
            }

            iterations += 1;
            let improved = match self.select(state, iterations) {
                Some(mv) => mv.try_improve(state, &mut ctx),
                None => None,
            };

            match improved {
                Some(imp) => {
                    improvements += 1;
                    stall = 0;
                    state.dead.clear();
                    tracing::trace!(iteration = iterations, edit = %imp.edit, score = imp.score, "improved");
                    observer.on_improvement(iterations, &imp, state.path());
                }
                None => stall += 1,
            }
        };

        let outcome = SearchOutcome {
            iterations,
            improvements,
            evaluations: ctx.evaluations(),
            reason,
            initial_score,
            final_score: state.score(),
        };
        tracing::debug!(
            iterations,
            improvements,
            evaluations = outcome.evaluations,
            %reason,
            "local search finished"
        );
        observer.on_search_end(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::observer::{NullObserver, tests::RecordingObserver},
        search::moves::testing::{evaluator, state},
    };

    #[test]
    fn test_zero_stall_budget_returns_immediately() {
        let ev = evaluator();
        let mut st = state(&ev, &[3, 1, 20], 1);
        let before = st.path().clone();
        let out = LocalSearchOptimizer::new(&ev)
            .with_max_stall(0)
            .run(&mut st, &mut NullObserver);
        assert_eq!(out.reason, TerminationReason::StallLimit);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.evaluations, 0);
        assert_eq!(st.path(), &before);
        assert_eq!(out.initial_score, out.final_score);
    }

    #[test]
    fn test_search_is_monotone_and_reports_improvements() {
        let ev = evaluator();
        let mut st = state(&ev, &[3, 1, 20], 17);
        let rec = RecordingObserver::default();
        let mut obs = rec.clone();
        let out = LocalSearchOptimizer::new(&ev)
            .with_allow_speed(false)
            .with_max_stall(60)
            .run(&mut st, &mut obs);

        assert!(out.final_score > out.initial_score);
        assert_eq!(out.final_score, st.score());
        assert_eq!(out.final_score, ev.evaluate(st.path()));

        let calls = rec.snapshot();
        assert_eq!(calls.start, 1);
        assert_eq!(calls.end, 1);
        assert_eq!(calls.improvements.len() as u64, out.improvements);
        let mut last = out.initial_score;
        for (_, score) in calls.improvements {
            assert!(score >= last);
            last = score;
        }
        assert!(st.path().iter().all(|u| !u.is_speed()));
    }

    #[test]
    fn test_pre_set_stop_token_stops_before_first_iteration() {
        let ev = evaluator();
        let mut st = state(&ev, &[3, 1, 20], 1);
        let stop = StopToken::new();
        stop.request_stop();
        let out = LocalSearchOptimizer::new(&ev)
            .with_stop_token(stop)
            .run(&mut st, &mut NullObserver);
        assert_eq!(out.reason, TerminationReason::Stopped);
        assert_eq!(out.iterations, 0);
    }

    #[test]
    fn test_exhausted_moves_end_in_rotation_scan() {
        let ev = evaluator();
        let mut st = state(&ev, &[0, 1, 2, 3, 20], 4);
        st.score = f64::INFINITY;
        let out = LocalSearchOptimizer::new(&ev)
            .with_max_stall(10_000)
            .run(&mut st, &mut NullObserver);
        assert_eq!(out.reason, TerminationReason::RotationExhausted);
        assert_eq!(out.improvements, 0);
        assert!(st.dead().is_dead(DeadMove::RotateExhausted));
    }

    #[test]
    fn test_duty_cycle_selection() {
        let ev = evaluator();
        let opt = LocalSearchOptimizer::new(&ev);
        let mut st = state(&ev, &[0, 1, 2, 3, 20], 4);
        let name = |st: &SearchState<_>, i| opt.select(st, i).map(|m| m.name().to_string());

        assert_eq!(name(&st, 1).as_deref(), Some("Insert"));
        assert_eq!(name(&st, 115).as_deref(), Some("Remove"));
        assert_eq!(name(&st, 31).as_deref(), Some("Rotate"));
        assert_eq!(name(&st, 50).as_deref(), Some("Swap"));

        st.dead.mark(DeadMove::Insert);
        assert_eq!(name(&st, 3).as_deref(), Some("Remove"));
        st.dead.mark(DeadMove::Remove);
        assert_eq!(name(&st, 3).as_deref(), Some("Rotate"));
        st.dead.mark(DeadMove::Swap);
        assert_eq!(name(&st, 50).as_deref(), Some("RotateExhaustive"));

        st.dead.clear();
        st.dead.mark(DeadMove::Swap);
        assert_eq!(name(&st, 50), None);
    }
}
