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

use upgrade_path_model::settings::BusyHours;

/// Forced waiting per second of the event.
///
/// For an instant `s` inside a busy interval `[start, end]` the schedule
/// holds `end - s`, the seconds left until the player is free again. Outside
/// every interval it holds zero. Intervals are written in input order, so a
/// later interval overwrites an earlier one where they overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusySchedule {
    total_seconds: usize,
    // Empty when there are no intervals.
    waits: Vec<u32>,
}

impl BusySchedule {
    /// A schedule without busy intervals.
    #[inline]
    pub fn free(total_seconds: usize) -> Self {
        Self {
            total_seconds,
            waits: Vec::new(),
        }
    }

    /// Builds a schedule from intervals given in seconds since event start.
    ///
    /// Both bounds are clamped into `[0, total_seconds - 1]` and an inverted
    /// interval is swapped.
    pub fn from_seconds(intervals: &[(i64, i64)], total_seconds: usize) -> Self {
        if intervals.is_empty() || total_seconds == 0 {
            return Self::free(total_seconds);
        }

        let last = (total_seconds - 1) as i64;
        let mut waits = vec![0u32; total_seconds];
        for &(start, end) in intervals {
            let mut start = start.clamp(0, last) as usize;
            let mut end = end.clamp(0, last) as usize;
            if start > end {
                std::mem::swap(&mut start, &mut end);
            }
            for (s, slot) in waits[start..=end].iter_mut().enumerate() {
                *slot = (end - start - s) as u32;
            }
        }

        Self {
            total_seconds,
            waits,
        }
    }

    /// Builds a schedule from intervals given in hours; hours are truncated
    /// to whole seconds.
    pub fn from_hours(intervals: &[BusyHours], total_seconds: usize) -> Self {
        let secs: Vec<(i64, i64)> = intervals
            .iter()
            .map(|b| ((b.start * 3600.0) as i64, (b.end * 3600.0) as i64))
            .collect();
        Self::from_seconds(&secs, total_seconds)
    }

    #[inline]
    pub fn total_seconds(&self) -> usize {
        self.total_seconds
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.waits.is_empty()
    }

    /// Seconds until free at instant `t`; zero when `t` lies outside the event.
    #[inline]
    pub fn time_until_free(&self, t: f64) -> f64 {
        if t.is_nan() || t < 0.0 {
            return 0.0;
        }
        self.waits
            .get(t as usize)
            .map(|&w| w as f64)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_schedule_never_waits() {
        let b = BusySchedule::free(10_000);
        assert!(b.is_free());
        assert_eq!(b.time_until_free(0.0), 0.0);
        assert_eq!(b.time_until_free(5_000.5), 0.0);
    }

    #[test]
    fn test_wait_counts_down_to_interval_end() {
        let b = BusySchedule::from_seconds(&[(1_000, 2_000)], 10_000);
        assert_eq!(b.time_until_free(999.0), 0.0);
        assert_eq!(b.time_until_free(1_000.0), 1_000.0);
        assert_eq!(b.time_until_free(1_500.7), 500.0);
        assert_eq!(b.time_until_free(2_000.0), 0.0);
        assert_eq!(b.time_until_free(2_001.0), 0.0);
    }

    #[test]
    fn test_out_of_range_lookups_are_zero() {
        let b = BusySchedule::from_seconds(&[(0, 99)], 100);
        assert_eq!(b.time_until_free(-1.0), 0.0);
        assert_eq!(b.time_until_free(100.0), 0.0);
        assert_eq!(b.time_until_free(f64::INFINITY), 0.0);
        assert_eq!(b.time_until_free(f64::NAN), 0.0);
    }

    #[test]
    fn test_bounds_are_clamped_and_swapped() {
        let b = BusySchedule::from_seconds(&[(150, 80)], 100);
        assert_eq!(b.time_until_free(80.0), 19.0);
        assert_eq!(b.time_until_free(99.0), 0.0);

        let b = BusySchedule::from_seconds(&[(-50, 10)], 100);
        assert_eq!(b.time_until_free(0.0), 10.0);
    }

    #[test]
    fn test_later_intervals_overwrite_earlier_ones() {
        let b = BusySchedule::from_seconds(&[(10, 50), (20, 30)], 100);
        assert_eq!(b.time_until_free(15.0), 35.0);
        assert_eq!(b.time_until_free(25.0), 5.0);
        assert_eq!(b.time_until_free(40.0), 10.0);
    }

    #[test]
    fn test_from_hours_truncates_to_seconds() {
        let b = BusySchedule::from_hours(
            &[BusyHours {
                start: 1.0,
                end: 1.5,
            }],
            86_400,
        );
        assert_eq!(b.time_until_free(3_600.0), 1_800.0);
        assert_eq!(b.time_until_free(5_399.0), 1.0);
    }
}
