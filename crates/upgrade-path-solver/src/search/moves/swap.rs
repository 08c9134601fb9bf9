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
    moves::traits::{Improvement, MoveContext, NeighborhoodMove, PathEdit},
    state::SearchState,
};

/// Exchanges two different upgrades before the sentinel.
///
/// Every unordered pair is visited once, in an order shifted by a random
/// offset.
#[derive(Debug, Default, Clone)]
pub struct SwapMove<A = StrictImprovementAcceptor> {
    acceptor: A,
}

impl SwapMove {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Acceptor> SwapMove<A> {
    #[inline]
    pub fn with_acceptor(acceptor: A) -> Self {
        Self { acceptor }
    }
}

impl<R: rand::Rng, A: Acceptor> NeighborhoodMove<R> for SwapMove<A> {
    fn name(&self) -> &str {
        "Swap"
    }

    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement> {
        let n = state.path.body_len();
        if n >= 2 {
            let start = state.rng.random_range(0..n);
            for i2 in 0..n {
                for j2 in (i2 + 1)..n {
                    let a = (i2 + start) % n;
                    let b = (j2 + start) % n;
                    let steps = state.path.as_slice();
                    if steps[a] == steps[b] {
                        continue;
                    }

                    ctx.candidate.clone_from(&state.path);
                    ctx.candidate.swap(a, b);
                    let score = ctx.score_candidate();
                    if self.acceptor.accept(state.score, score) {
                        tracing::trace!(a, b, score, "swap accepted");
                        return Some(state.commit(&ctx.candidate, PathEdit::Swap { a, b }, score));
                    }
                }
            }
        }

        tracing::debug!(len = n, "swap exhausted");
        state.dead.mark(DeadMove::Swap);
        None
    }
}
