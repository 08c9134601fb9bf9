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

use upgrade_path_model::{
    settings::{ScoreWeights, Settings},
    state::ResourceState,
    upgrade::ResourceIndex,
};

/// Weight applied to the raw total of every resource to break ties.
const TIE_BREAK_WEIGHT: f64 = 1e-15;

/// Fraction of the event currency weight earned above the cap.
const OVER_CAP_FRACTION: f64 = 0.01;

/// Maps a final resource state to a scalar utility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringFunction {
    weights: ScoreWeights,
    event_currency_cap: f64,
}

impl ScoringFunction {
    #[inline]
    pub fn new(weights: ScoreWeights, event_currency_cap: f64) -> Self {
        Self {
            weights,
            event_currency_cap,
        }
    }

    #[inline]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.weights, settings.event_currency_cap)
    }

    #[inline]
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn score(&self, resources: &ResourceState) -> f64 {
        let w = &self.weights;
        let noise: f64 = resources.iter().map(|v| v * TIE_BREAK_WEIGHT).sum();

        let ec = resources.event_currency();
        let capped = ec.min(self.event_currency_cap);
        let excess = (ec - self.event_currency_cap).max(0.0);

        noise
            + (capped + excess * OVER_CAP_FRACTION) * w.event_currency
            + resources.get(ResourceIndex::FREE_EXP) * w.free_exp
            + resources.get(ResourceIndex::GROWTH) * w.growth
            + resources.get(ResourceIndex::PET_STONES) * w.pet_stones
    }
}
