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

use crate::{eval::path::PathEvaluator, search::state::SearchState};
use upgrade_path_model::{path::UpgradePath, upgrade::UpgradeType};

/// A structural edit that was applied to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEdit {
    Insert { index: usize, upgrade: UpgradeType },
    Remove { index: usize, upgrade: UpgradeType },
    Swap { a: usize, b: usize },
    /// Window `[start, end]` rotated so that `pivot` became its first element.
    Rotate { start: usize, end: usize, pivot: usize },
}

impl PathEdit {
    pub fn kind(&self) -> &'static str {
        match self {
            PathEdit::Insert { .. } => "Insert",
            PathEdit::Remove { .. } => "Remove",
            PathEdit::Swap { .. } => "Swap",
            PathEdit::Rotate { .. } => "Rotate",
        }
    }
}

impl std::fmt::Display for PathEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathEdit::Insert { index, upgrade } => write!(f, "Insert({}, {})", index, upgrade),
            PathEdit::Remove { index, upgrade } => write!(f, "Remove({}, {})", index, upgrade),
            PathEdit::Swap { a, b } => write!(f, "Swap({}, {})", a, b),
            PathEdit::Rotate { start, end, pivot } => {
                write!(f, "Rotate({}, {}, {})", start, end, pivot)
            }
        }
    }
}

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improvement {
    pub edit: PathEdit,
    pub score: f64,
    pub previous_score: f64,
}

/// Shared inputs of a move attempt.
///
/// `candidate` is scratch space; moves overwrite it from the current path
/// before every evaluation.
#[derive(Debug)]
pub struct MoveContext<'e> {
    evaluator: &'e PathEvaluator,
    allow_speed: bool,
    pub(crate) candidate: UpgradePath,
    evaluations: u64,
}

impl<'e> MoveContext<'e> {
    pub fn new(evaluator: &'e PathEvaluator, allow_speed: bool) -> Self {
        Self {
            evaluator,
            allow_speed,
            candidate: UpgradePath::default(),
            evaluations: 0,
        }
    }

    #[inline]
    pub fn evaluator(&self) -> &'e PathEvaluator {
        self.evaluator
    }

    #[inline]
    pub fn allow_speed(&self) -> bool {
        self.allow_speed
    }

    /// Number of candidate paths scored so far.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    #[inline]
    pub(crate) fn score_candidate(&mut self) -> f64 {
        self.evaluations += 1;
        self.evaluator.evaluate(&self.candidate)
    }
}

/// A first-improvement neighborhood over the path.
///
/// On success the move has already replaced the path and score in `state`.
/// A move that scans its whole neighborhood without success marks itself
/// dead in `state`.
pub trait NeighborhoodMove<R: rand::Rng> {
    fn name(&self) -> &str;
    fn try_improve(
        &self,
        state: &mut SearchState<R>,
        ctx: &mut MoveContext<'_>,
    ) -> Option<Improvement>;
}

impl<R: rand::Rng> std::fmt::Debug for dyn NeighborhoodMove<R> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NeighborhoodMove({})", self.name())
    }
}

/// Start position and direction of the `k`-th rotation of window `[i, j]`.
///
/// Even `k` rotate left by `(k + 2) / 2`, odd `k` rotate right by the same
/// amount, so offsets alternate sides while growing.
#[inline]
pub(crate) fn rotation_pivot(i: usize, j: usize, k: usize) -> usize {
    let offset = (k + 2) / 2;
    if k.is_multiple_of(2) {
        i + offset
    } else {
        j + 1 - offset
    }
}
