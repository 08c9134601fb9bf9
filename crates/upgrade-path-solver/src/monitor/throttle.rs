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
    monitor::observer::SearchObserver,
    search::{moves::traits::Improvement, optimizer::SearchOutcome},
};
use std::time::{Duration, Instant};
use upgrade_path_model::path::UpgradePath;

/// Forwards at most one improvement per wall-clock interval to `inner`.
///
/// Start and end events always pass through. Dropping an improvement only
/// affects what is reported, never the search.
#[derive(Debug)]
pub struct ThrottledObserver<O> {
    inner: O,
    interval: Option<Duration>,
    last: Instant,
    suppressed: u64,
}

impl<O: SearchObserver> ThrottledObserver<O> {
    /// `None` forwards every improvement.
    pub fn new(inner: O, interval: Option<Duration>) -> Self {
        Self {
            inner,
            interval,
            last: Instant::now(),
            suppressed: 0,
        }
    }

    /// Interval in milliseconds; `<= 0` disables throttling.
    pub fn from_millis(inner: O, millis: i64) -> Self {
        let interval = (millis > 0).then(|| Duration::from_millis(millis as u64));
        Self::new(inner, interval)
    }

    #[inline]
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Improvements withheld since the search started.
    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    fn due(&mut self) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        let now = Instant::now();
        if now.duration_since(self.last) >= interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

impl<O: SearchObserver> SearchObserver for ThrottledObserver<O> {
    fn name(&self) -> &str {
        "ThrottledObserver"
    }

    fn on_search_start(&mut self, initial_score: f64, path: &UpgradePath) {
        self.last = Instant::now();
        self.suppressed = 0;
        self.inner.on_search_start(initial_score, path);
    }

    fn on_improvement(&mut self, iteration: u64, improvement: &Improvement, path: &UpgradePath) {
        if self.due() {
            self.inner.on_improvement(iteration, improvement, path);
        } else {
            self.suppressed += 1;
        }
    }

    fn on_search_end(&mut self, outcome: &SearchOutcome) {
        if self.suppressed > 0 {
            tracing::debug!(suppressed = self.suppressed, "throttled improvement reports");
        }
        self.inner.on_search_end(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::observer::tests::{RecordingObserver, improvement, outcome},
        search::optimizer::TerminationReason,
    };

    #[test]
    fn test_without_interval_everything_passes() {
        let rec = RecordingObserver::default();
        let mut t = ThrottledObserver::from_millis(rec.clone(), 0);
        let p = UpgradePath::default();
        t.on_search_start(0.0, &p);
        for i in 0..5 {
            t.on_improvement(i, &improvement(i as f64), &p);
        }
        t.on_search_end(&outcome(TerminationReason::StallLimit));

        let s = rec.snapshot();
        assert_eq!(s.improvements.len(), 5);
        assert_eq!(s.end, 1);
        assert_eq!(t.suppressed(), 0);
    }

    #[test]
    fn test_long_interval_withholds_improvements() {
        let rec = RecordingObserver::default();
        let mut t = ThrottledObserver::new(rec.clone(), Some(Duration::from_secs(3600)));
        let p = UpgradePath::default();
        t.on_search_start(0.0, &p);
        for i in 0..3 {
            t.on_improvement(i, &improvement(1.0), &p);
        }
        t.on_search_end(&outcome(TerminationReason::Stopped));

        let s = rec.snapshot();
        assert_eq!(s.start, 1);
        assert!(s.improvements.is_empty());
        assert_eq!(s.end, 1);
        assert_eq!(t.suppressed(), 3);
    }
}
