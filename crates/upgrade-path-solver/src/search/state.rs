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
    search::{
        dead::DeadMoves,
        moves::traits::{Improvement, PathEdit},
    },
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use upgrade_path_model::path::UpgradePath;

/// RNG for a run: seeded when a seed is given, from OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

/// Path under optimisation together with its score, the random source and
/// the moves exhausted since the last improvement.
#[derive(Debug, Clone)]
pub struct SearchState<R> {
    pub(crate) path: UpgradePath,
    pub(crate) score: f64,
    pub(crate) rng: R,
    pub(crate) dead: DeadMoves,
}

impl<R> SearchState<R> {
    #[inline]
    pub fn new(path: UpgradePath, score: f64, rng: R) -> Self {
        Self {
            path,
            score,
            rng,
            dead: DeadMoves::new(),
        }
    }

    /// Starts from `path`, scored by `evaluator`.
    #[inline]
    pub fn evaluated(path: UpgradePath, evaluator: &PathEvaluator, rng: R) -> Self {
        let score = evaluator.evaluate(&path);
        Self::new(path, score, rng)
    }

    #[inline]
    pub fn path(&self) -> &UpgradePath {
        &self.path
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn dead(&self) -> &DeadMoves {
        &self.dead
    }

    #[inline]
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    #[inline]
    pub fn into_path(self) -> UpgradePath {
        self.path
    }

    /// Replaces the path with an accepted candidate.
    pub(crate) fn commit(&mut self, candidate: &UpgradePath, edit: PathEdit, score: f64) -> Improvement {
        let previous_score = self.score;
        self.path.clone_from(candidate);
        self.score = score;
        Improvement {
            edit,
            score,
            previous_score,
        }
    }
}
