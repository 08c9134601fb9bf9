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
    eval::score::ScoringFunction,
    sim::{
        simulator::{ResourceSimulator, SimulationContext},
        trace::SimulationTrace,
    },
};
use upgrade_path_model::{
    path::UpgradePath,
    settings::Settings,
    state::{LevelState, ResourceState},
    upgrade::{NUM_RESOURCES, ResourceIndex, SPEED_LEVEL_CAP, UpgradeType},
};

/// Final state of a simulated path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOutcome {
    pub levels: LevelState,
    pub resources: ResourceState,
    pub leftover_seconds: f64,
    pub score: f64,
}

/// Scores whole paths against a fixed starting state.
///
/// Every evaluation starts from a fresh copy of the starting levels and
/// resources. Infeasible paths score `f64::NEG_INFINITY`.
#[derive(Debug, Clone)]
pub struct PathEvaluator {
    simulator: ResourceSimulator,
    scoring: ScoringFunction,
    start_levels: LevelState,
    start_resources: ResourceState,
}

impl PathEvaluator {
    pub fn new(
        ctx: SimulationContext,
        scoring: ScoringFunction,
        start_levels: LevelState,
        start_resources: ResourceState,
    ) -> Self {
        let mut start_resources = start_resources;
        start_resources.clamp_event_currency(ctx.event_currency_cap());
        Self {
            simulator: ResourceSimulator::new(ctx),
            scoring,
            start_levels,
            start_resources,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            SimulationContext::from_settings(settings),
            ScoringFunction::from_settings(settings),
            settings.current_levels,
            settings.resource_counts,
        )
    }

    #[inline]
    pub fn simulator(&self) -> &ResourceSimulator {
        &self.simulator
    }

    #[inline]
    pub fn scoring(&self) -> &ScoringFunction {
        &self.scoring
    }

    #[inline]
    pub fn start_levels(&self) -> &LevelState {
        &self.start_levels
    }

    #[inline]
    pub fn start_resources(&self) -> &ResourceState {
        &self.start_resources
    }

    /// False when completing every step would push a speed track past the cap.
    pub fn is_feasible(&self, steps: &[UpgradeType]) -> bool {
        let mut speed = [0u32; NUM_RESOURCES];
        for r in ResourceIndex::all() {
            speed[r.get()] = self.start_levels.speed_level(r);
        }
        for u in steps {
            if let UpgradeType::Speed(r) = u {
                let level = &mut speed[r.get()];
                *level += 1;
                if *level > SPEED_LEVEL_CAP {
                    return false;
                }
            }
        }
        true
    }

    #[inline]
    pub fn evaluate(&self, path: &UpgradePath) -> f64 {
        self.evaluate_steps(path.as_slice())
    }

    /// Scores raw integer codes; any code outside `0..=20` is infeasible.
    pub fn evaluate_codes(&self, codes: &[i64]) -> f64 {
        match UpgradePath::from_codes(codes) {
            Ok(path) => self.evaluate(&path),
            Err(_) => f64::NEG_INFINITY,
        }
    }

    pub fn evaluate_steps(&self, steps: &[UpgradeType]) -> f64 {
        if !self.is_feasible(steps) {
            return f64::NEG_INFINITY;
        }
        let mut levels = self.start_levels;
        let mut resources = self.start_resources;
        self.simulator
            .simulate_path(steps, &mut levels, &mut resources, None);
        self.scoring.score(&resources)
    }

    /// Simulates `path` without the feasibility gate, optionally recording
    /// each step.
    pub fn run(&self, path: &UpgradePath, trace: Option<&mut SimulationTrace>) -> PathOutcome {
        let mut levels = self.start_levels;
        let mut resources = self.start_resources;
        let leftover_seconds =
            self.simulator
                .simulate_path(path.as_slice(), &mut levels, &mut resources, trace);
        PathOutcome {
            levels,
            resources,
            leftover_seconds,
            score: self.scoring.score(&resources),
        }
    }
}
