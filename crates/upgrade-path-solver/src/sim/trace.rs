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

use upgrade_path_model::{names::ResourceNames, upgrade::UpgradeType};

/// One simulated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    pub upgrade: UpgradeType,
    /// Level of the upgraded track after the step.
    pub level: u32,
    pub seconds_spent: f64,
    /// Whole seconds since event start once the step finished.
    pub elapsed_seconds: u64,
}

impl TraceStep {
    /// `<upgrade name> <level> D days, H hours, M minutes`.
    pub fn readout(&self, names: &ResourceNames) -> String {
        let s = self.elapsed_seconds;
        format!(
            "{} {} {} days, {} hours, {} minutes",
            names.upgrade(self.upgrade),
            self.level,
            s / 86_400,
            s / 3_600 % 24,
            s / 60 % 60
        )
    }
}

/// Per-step record of a simulation. Recording never changes the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTrace {
    steps: Vec<TraceStep>,
}

impl SimulationTrace {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    #[inline]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn readout<'a>(&'a self, names: &'a ResourceNames) -> impl Iterator<Item = String> + 'a {
        self.steps.iter().map(move |s| s.readout(names))
    }
}
