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
    acceptor::{Acceptor, NonWorseningAcceptor},
    dead::DeadMove,
    moves::traits::{Improvement, MoveContext, NeighborhoodMove, PathEdit},
    state::SearchState,
};

/// Removes one upgrade before the sentinel.
///
/// Accepts plateaus by default: a removal that keeps the score shortens the
/// path for free. Speed upgrades are left alone when they may not be added.
#[derive(Debug, Default, Clone)]
pub struct RemoveMove<A = NonWorseningAcceptor> {
    acceptor: A,
}

impl RemoveMove {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Acceptor> RemoveMove<A> {
    #[inline]
    pub fn with_acceptor(acceptor: A) -> Self {
        Self { acceptor }
    }
}

impl<R: rand::Rng, A: Acceptor> NeighborhoodMove<R> for RemoveMove<A> {
    fn name(&self) -> &str {
        "Remove"
    }

    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement> {
        let n = state.path.body_len();
        if n > 0 {
            let start = state.rng.random_range(0..n);
            for i in 0..n {
                let index = (i + start) % n;
                let upgrade = state.path.as_slice()[index];
                if !ctx.allow_speed() && upgrade.is_speed() {
                    continue;
                }

                ctx.candidate.clone_from(&state.path);
                ctx.candidate.remove(index);
                let score = ctx.score_candidate();
                if self.acceptor.accept(state.score, score) {
                    tracing::trace!(index, %upgrade, score, "remove accepted");
                    let edit = PathEdit::Remove { index, upgrade };
                    return Some(state.commit(&ctx.candidate, edit, score));
                }
            }
        }

        tracing::debug!(len = n, "remove exhausted");
        state.dead.mark(DeadMove::Remove);
        None
    }
}
