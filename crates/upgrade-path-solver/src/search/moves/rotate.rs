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

use crate::search::{
    acceptor::{Acceptor, StrictImprovementAcceptor},
    dead::DeadMove,
    moves::traits::{Improvement, MoveContext, NeighborhoodMove, PathEdit, rotation_pivot},
    state::SearchState,
};

/// Tries every rotation of window `[i, j]` of the current path.
fn try_window<R: rand::Rng, A: Acceptor>(
    acceptor: &A,
    state: &mut SearchState<R>,
    ctx: &mut MoveContext<'_>,
    i: usize,
    j: usize,
) -> Option<Improvement> {
    for k in 0..(j - i) {
        let pivot = rotation_pivot(i, j, k);
        ctx.candidate.clone_from(&state.path);
        ctx.candidate.rotate(i, j, pivot);
        let score = ctx.score_candidate();
        if acceptor.accept(state.score, score) {
            tracing::trace!(start = i, end = j, pivot, score, "rotate accepted");
            let edit = PathEdit::Rotate {
                start: i,
                end: j,
                pivot,
            };
            return Some(state.commit(&ctx.candidate, edit, score));
        }
    }
    None
}

/// Rotates a single randomly drawn window of at least three upgrades.
///
/// Only one window is sampled per call, so failure says nothing about the
/// neighborhood and the move never marks itself dead.
#[derive(Debug, Default, Clone)]
pub struct BoundedRotateMove<A = StrictImprovementAcceptor> {
    acceptor: A,
}

impl BoundedRotateMove {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Acceptor> BoundedRotateMove<A> {
    #[inline]
    pub fn with_acceptor(acceptor: A) -> Self {
        Self { acceptor }
    }
}

impl<R: rand::Rng, A: Acceptor> NeighborhoodMove<R> for BoundedRotateMove<A> {
    fn name(&self) -> &str {
        "Rotate"
    }

    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement> {
        let n = state.path.body_len();
        if n < 3 {
            return None;
        }
        let i = state.rng.random_range(0..=n - 3);
        let j = state.rng.random_range(i + 2..=n - 1);
        let found = try_window(&self.acceptor, state, ctx, i, j);
        if found.is_none() {
            tracing::debug!(start = i, end = j, "rotate window without improvement");
        }
        found
    }
}

/// Rotates every window of at least three upgrades.
///
/// Window starts and ends are visited from random offsets. Marks
/// [`DeadMove::RotateExhausted`] after a full scan without success.
#[derive(Debug, Default, Clone)]
pub struct ExhaustiveRotateMove<A = StrictImprovementAcceptor> {
    acceptor: A,
}

impl ExhaustiveRotateMove {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Acceptor> ExhaustiveRotateMove<A> {
    #[inline]
    pub fn with_acceptor(acceptor: A) -> Self {
        Self { acceptor }
    }
}

impl<R: rand::Rng, A: Acceptor> NeighborhoodMove<R> for ExhaustiveRotateMove<A> {
    fn name(&self) -> &str {
        "RotateExhaustive"
    }

    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement> {
        let n = state.path.body_len();
        if n >= 3 {
            let starts = n - 2;
            let start_offset = state.rng.random_range(0..starts);
            for a in 0..starts {
                let i = (a + start_offset) % starts;
                let ends = n - i - 2;
                let end_offset = state.rng.random_range(0..ends);
                for b in 0..ends {
                    let j = i + 2 + (b + end_offset) % ends;
                    if let Some(imp) = try_window(&self.acceptor, state, ctx, i, j) {
                        return Some(imp);
                    }
                }
            }
        }

        tracing::debug!(len = n, "exhaustive rotate found nothing");
        state.dead.mark(DeadMove::RotateExhausted);
        None
    }
}
