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
    path::UpgradePath,
    settings::Settings,
    state::{LevelState, ResourceState},
    upgrade::ResourceIndex,
};
use upgrade_path_solver::eval::path::PathOutcome;

/// Human-readable summary of one simulated path.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub title: &'a str,
    pub path: &'a UpgradePath,
    pub levels: LevelState,
    pub resources: ResourceState,
    pub score: f64,
    pub dls: i64,
    pub unlocked_pets: i64,
}

impl<'a> Report<'a> {
    pub fn new(
        title: &'a str,
        settings: &Settings,
        path: &'a UpgradePath,
        outcome: &PathOutcome,
        score: f64,
    ) -> Self {
        Self {
            title,
            path,
            levels: outcome.levels,
            resources: outcome.resources,
            score,
            dls: settings.dls,
            unlocked_pets: settings.unlocked_pets,
        }
    }

    /// Free Exp as worth for the configured DLs.
    pub fn free_exp(&self) -> f64 {
        self.resources.get(ResourceIndex::FREE_EXP) * (500 + self.dls) as f64 / 5.0
    }

    /// Growth as worth for the unlocked pets.
    pub fn growth(&self) -> f64 {
        self.resources.get(ResourceIndex::GROWTH) * self.unlocked_pets as f64 / 100.0
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("=== {} ===", self.title),
            format!("Upgrade path: {}", self.path),
            format!("Resources: {}", self.resources),
            format!("Levels: {}", self.levels),
            format!(
                "Event Currency: {:.2}",
                self.resources.get(ResourceIndex::EVENT_CURRENCY)
            ),
            format!("Free Exp ({} DLs): {:.2}", self.dls, self.free_exp()),
            format!(
                "Pet Stones: {:.2}",
                self.resources.get(ResourceIndex::PET_STONES)
            ),
            format!("Growth ({} pets): {:.2}", self.unlocked_pets, self.growth()),
            format!("Score: {}", self.score),
        ]
    }

    pub fn log(&self) {
        for line in self.lines() {
            tracing::info!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(resources: [f64; 10]) -> PathOutcome {
        PathOutcome {
            levels: LevelState::new(),
            resources: ResourceState::new(resources),
            leftover_seconds: 0.0,
            score: 0.0,
        }
    }

    #[test]
    fn test_derived_values() {
        let mut s = Settings::default();
        s.dls = 100;
        s.unlocked_pets = 50;
        let p = UpgradePath::from_codes(&[1, 20]).unwrap();
        let o = outcome([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 10.0, 40.0, 7.0]);
        let r = Report::new("Final", &s, &p, &o, 1.5);

        assert_eq!(r.free_exp(), 10.0 * 600.0 / 5.0);
        assert_eq!(r.growth(), 20.0);
    }

    #[test]
    fn test_lines_contain_path_and_score() {
        let s = Settings::default();
        let p = UpgradePath::from_codes(&[1, 0, 20]).unwrap();
        let o = outcome([0.0; 10]);
        let lines = Report::new("Initial", &s, &p, &o, f64::NEG_INFINITY).lines();

        assert_eq!(lines[0], "=== Initial ===");
        assert_eq!(lines[1], "Upgrade path: {1,0,20}");
        assert_eq!(lines[4], "Event Currency: 0.00");
        assert_eq!(lines.last().map(String::as_str), Some("Score: -inf"));
    }
}
