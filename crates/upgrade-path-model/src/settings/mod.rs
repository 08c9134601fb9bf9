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

pub mod err;
pub mod loader;

use crate::{
    names::ResourceNames,
    path::UpgradePath,
    state::{LevelState, ResourceState},
};
use std::path::PathBuf;

/// Default ceiling of the event currency.
pub const DEFAULT_EVENT_CURRENCY_CAP: f64 = 10_000.0;

/// Length of the event, split the way the settings file spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Default for EventDuration {
    fn default() -> Self {
        Self {
            days: 14,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

impl EventDuration {
    /// Total seconds; a non-positive duration counts as one second.
    pub fn total_seconds(&self) -> usize {
        let total = self
            .days
            .saturating_mul(86_400)
            .saturating_add(self.hours.saturating_mul(3_600))
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds);
        if total <= 0 { 1 } else { total as usize }
    }
}

/// Weights of the scored resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub event_currency: f64,
    pub free_exp: f64,
    pub pet_stones: f64,
    pub growth: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            event_currency: 0.001,
            free_exp: 0.00006,
            pet_stones: 0.000045,
            growth: 0.00007,
        }
    }
}

/// A busy interval in hours since event start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusyHours {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub event_duration: EventDuration,
    pub unlocked_pets: i64,
    pub dls: i64,
    /// Minimum milliseconds between improvement announcements; `<= 0` logs every one.
    pub output_interval_ms: i64,
    pub weights: ScoreWeights,
    pub event_currency_cap: f64,
    pub is_full_path: bool,
    pub allow_speed_upgrades: bool,
    pub run_optimization: bool,
    pub log_to_console: bool,
    pub log_to_file: bool,
    pub append_log_file: bool,
    pub log_file_path: PathBuf,
    pub pause_on_exit: bool,
    pub max_optimization_iterations: usize,
    pub seed: Option<u64>,
    pub current_levels: LevelState,
    pub resource_counts: ResourceState,
    pub upgrade_path: UpgradePath,
    pub busy_times: Vec<BusyHours>,
    pub resource_names: ResourceNames,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event_duration: EventDuration::default(),
            unlocked_pets: 100,
            dls: 0,
            output_interval_ms: 5_000,
            weights: ScoreWeights::default(),
            event_currency_cap: DEFAULT_EVENT_CURRENCY_CAP,
            is_full_path: true,
            allow_speed_upgrades: true,
            run_optimization: true,
            log_to_console: true,
            log_to_file: false,
            append_log_file: false,
            log_file_path: PathBuf::from("logs/run_latest.txt"),
            pause_on_exit: false,
            max_optimization_iterations: 20_000,
            seed: None,
            current_levels: LevelState::new(),
            resource_counts: ResourceState::new([
                0.0, 500_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
            ]),
            upgrade_path: UpgradePath::default(),
            busy_times: Vec::new(),
            resource_names: ResourceNames::default(),
        }
    }
}

impl Settings {
    #[inline]
    pub fn total_seconds(&self) -> usize {
        self.event_duration.total_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_is_two_weeks() {
        assert_eq!(Settings::default().total_seconds(), 14 * 24 * 3600);
    }

    #[test]
    fn test_non_positive_duration_counts_as_one_second() {
        let d = EventDuration {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        };
        assert_eq!(d.total_seconds(), 1);
        let d = EventDuration {
            days: -1,
            hours: 2,
            minutes: 0,
            seconds: 0,
        };
        assert_eq!(d.total_seconds(), 1);
    }
}
