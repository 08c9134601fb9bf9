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
use upgrade_path_model::upgrade::UpgradeType;

/// Inserts one upgrade anywhere before the sentinel.
///
/// Positions are scanned from a random start with wrap-around; at every
/// position the candidate upgrades are tried from a fresh random offset.
#[derive(Debug, Default, Clone)]
pub struct InsertMove<A = StrictImprovementAcceptor> {
    acceptor: A,
}

impl InsertMove {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Acceptor> InsertMove<A> {
    #[inline]
    pub fn with_acceptor(acceptor: A) -> Self {
        Self { acceptor }
    }
}

impl<R: rand::Rng, A: Acceptor> NeighborhoodMove<R> for InsertMove<A> {
    fn name(&self) -> &str {
        "Insert"
    }

    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement> {
        let candidates = UpgradeType::candidates(ctx.allow_speed());
        let positions = state.path.body_len() + 1;
        let start = state.rng.random_range(0..positions);

        for i in 0..positions {
            let index = (i + start) % positions;
            let type_start = state.rng.random_range(0..candidates.len());
            ctx.candidate.clone_from(&state.path);
            ctx.candidate.insert(index, candidates[type_start]);

            for t in 0..candidates.len() {
                let upgrade = candidates[(t + type_start) % candidates.len()];
                ctx.candidate.set(index, upgrade);
                let score = ctx.score_candidate();
                if self.acceptor.accept(state.score, score) {
                    tracing::trace!(index, %upgrade, score, "insert accepted");
                    let edit = PathEdit::Insert { index, upgrade };
                    return Some(state.commit(&ctx.candidate, edit, score));
                }
            }
        }

        tracing::debug!(positions, "insert exhausted");
        state.dead.mark(DeadMove::Insert);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{
        acceptor::NonWorseningAcceptor,
        moves::testing::{evaluator, state},
    };

    #[test]
    fn test_insert_improves_sentinel_only_path() {
        let ev = evaluator();
        let mut st = state(&ev, &[20], 3);
        let mut ctx = MoveContext::new(&ev, false);
        let before = st.score();

        let imp = InsertMove::new().try_improve(&mut st, &mut ctx).unwrap();
        assert!(imp.score > before);
        assert_eq!(st.score(), imp.score);
        assert_eq!(st.path().len(), 2);
        assert!(st.path().ends_with_complete());
        assert!(!st.dead().is_dead(DeadMove::Insert));
        match imp.edit {
            PathEdit::Insert { index, upgrade } => {
                assert_eq!(index, 0);
                assert!(!upgrade.is_speed());
            }
            other => panic!("unexpected edit {other}"),
        }
        assert!(ctx.evaluations() >= 1);
    }

    #[test]
    fn test_insert_marks_itself_dead_when_nothing_improves() {
        let ev = evaluator();
        let mut st = state(&ev, &[20], 3);
        // Nothing can beat an infinite score.
        st.score = f64::INFINITY;
        let mut ctx = MoveContext::new(&ev, true);
        assert!(InsertMove::new().try_improve(&mut st, &mut ctx).is_none());
        assert!(st.dead().is_dead(DeadMove::Insert));
        assert_eq!(ctx.evaluations(), 20);
        assert_eq!(st.path().len(), 1);
    }

    #[test]
    fn test_custom_acceptor_is_used() {
        let ev = evaluator();
        let mut st = state(&ev, &[20], 9);
        st.score = f64::INFINITY;
        let mut ctx = MoveContext::new(&ev, false);
        let mv = InsertMove::with_acceptor(NonWorseningAcceptor);
        assert!(mv.try_improve(&mut st, &mut ctx).is_none());
    }
}
